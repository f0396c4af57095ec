use utoipa::OpenApi;

use crate::domain::todo::TodoItem;
use crate::http::routes::todos;
use crate::http::types::ErrorBody;

#[derive(OpenApi)]
#[openapi(
    info(title = "Todo API", description = "List, get, save and remove todo items"),
    paths(
        todos::list_todos,
        todos::get_todo,
        todos::save_todo,
        todos::remove_todo,
    ),
    components(schemas(TodoItem, ErrorBody)),
    tags((name = "todo"))
)]
pub struct ApiDoc;
