use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::context::TodoContext;
use crate::domain::store::{StoreError, TodoStore};
use crate::domain::todo::{TodoId, TodoItem};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("todo item {0} not found")]
    NotFound(TodoId),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, ServiceError>;

#[async_trait]
pub trait TodoService: Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<TodoItem>>;
    async fn get(&self, id: TodoId) -> Result<TodoItem>;
    /// Inserts `item`, or replaces the whole record when its id already exists.
    async fn save(&self, item: TodoItem) -> Result<()>;
    async fn remove(&self, id: TodoId) -> Result<()>;
}

/// [`TodoService`] over a shared store. The store outlives the service.
pub struct TodoServiceImpl<S: TodoStore> {
    store: Arc<S>,
}

impl<S: TodoStore> Clone for TodoServiceImpl<S> {
    fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: TodoStore> TodoServiceImpl<S> {
    pub fn new(store: Arc<S>) -> Self { Self { store } }

    fn context(&self) -> TodoContext<'_, S> { TodoContext::new(&*self.store) }
}

#[async_trait]
impl<S: TodoStore> TodoService for TodoServiceImpl<S> {
    async fn list(&self) -> Result<Vec<TodoItem>> { Ok(self.store.all().await?) }

    async fn get(&self, id: TodoId) -> Result<TodoItem> {
        tracing::debug!(%id, "get todo item");
        self.store.find(id).await?.ok_or(ServiceError::NotFound(id))
    }

    async fn save(&self, item: TodoItem) -> Result<()> {
        let mut ctx = self.context();
        let replaced = match ctx.find(item.id).await? {
            Some(existing) => { ctx.remove(&existing); true }
            None => false,
        };
        let id = item.id;
        ctx.add(item);
        ctx.commit().await?;
        tracing::info!(%id, replaced, "saved todo item");
        Ok(())
    }

    async fn remove(&self, id: TodoId) -> Result<()> {
        let mut ctx = self.context();
        let Some(existing) = ctx.find(id).await? else { return Err(ServiceError::NotFound(id)) };
        ctx.remove(&existing);
        ctx.commit().await?;
        tracing::info!(%id, "removed todo item");
        Ok(())
    }
}
