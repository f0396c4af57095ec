use axum::{extract::{Path, State}, routing::{delete, get, post}, Json, Router};
use http::StatusCode;

use crate::{
    application::todo_service::TodoService,
    domain::todo::{TodoId, TodoItem},
    http::types::ApiError,
};

#[derive(Clone)]
pub struct AppState<S: TodoService> { pub service: S }

/// Routes relative to the `/api/todo` prefix.
pub fn router<S: TodoService + Clone + Send + Sync + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/list", get(list_todos::<S>))
        .route("/get/:id", get(get_todo::<S>))
        .route("/save", post(save_todo::<S>))
        .route("/remove/:id", delete(remove_todo::<S>))
        .with_state(state)
}

/// List every stored todo item.
#[utoipa::path(
    get, path = "/api/todo/list", tag = "todo",
    responses(
        (status = 200, description = "All todo items", body = [TodoItem]),
        (status = 500, description = "Store failure", body = crate::http::types::ErrorBody)
    )
)]
pub async fn list_todos<S: TodoService>(State(state): State<AppState<S>>) -> Result<Json<Vec<TodoItem>>, ApiError> {
    let items = state.service.list().await?;
    Ok(Json(items))
}

/// Get a todo item by id.
#[utoipa::path(
    get, path = "/api/todo/get/{id}", tag = "todo",
    params(("id" = i64, Path, description = "Todo item id")),
    responses(
        (status = 200, description = "The requested todo item", body = TodoItem),
        (status = 404, description = "No item with that id", body = crate::http::types::ErrorBody)
    )
)]
pub async fn get_todo<S: TodoService>(State(state): State<AppState<S>>, Path(id): Path<i64>) -> Result<Json<TodoItem>, ApiError> {
    let item = state.service.get(TodoId(id)).await?;
    Ok(Json(item))
}

/// Create a todo item, or replace the one sharing its id.
#[utoipa::path(
    post, path = "/api/todo/save", tag = "todo",
    request_body = TodoItem,
    responses(
        (status = 200, description = "Saved"),
        (status = 500, description = "Store failure", body = crate::http::types::ErrorBody)
    )
)]
pub async fn save_todo<S: TodoService>(State(state): State<AppState<S>>, Json(item): Json<TodoItem>) -> Result<StatusCode, ApiError> {
    state.service.save(item).await?;
    Ok(StatusCode::OK)
}

/// Remove a todo item by id.
#[utoipa::path(
    delete, path = "/api/todo/remove/{id}", tag = "todo",
    params(("id" = i64, Path, description = "Todo item id")),
    responses(
        (status = 200, description = "Removed"),
        (status = 404, description = "No item with that id", body = crate::http::types::ErrorBody)
    )
)]
pub async fn remove_todo<S: TodoService>(State(state): State<AppState<S>>, Path(id): Path<i64>) -> Result<StatusCode, ApiError> {
    state.service.remove(TodoId(id)).await?;
    Ok(StatusCode::OK)
}
