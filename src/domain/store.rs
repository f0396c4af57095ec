use async_trait::async_trait;
use thiserror::Error;

use super::todo::{TodoId, TodoItem};

/// A mutation staged by a [`TodoContext`](super::context::TodoContext) and
/// applied by [`TodoStore::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Add(TodoItem),
    Remove(TodoId),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("todo item {0} already exists")]
    Conflict(TodoId),
    #[error("no todo item id left to assign")]
    KeySpaceExhausted,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Keyed collection of todo items.
///
/// Implementations serialise conflicting writes internally; `apply` is
/// all-or-nothing.
#[async_trait]
pub trait TodoStore: Send + Sync + 'static {
    async fn init(&self) -> StoreResult<()>;
    async fn all(&self) -> StoreResult<Vec<TodoItem>>;
    async fn find(&self, id: TodoId) -> StoreResult<Option<TodoItem>>;
    /// Applies `changes` in order and returns how many were applied.
    /// An `Add` with an unassigned id gets the next free key.
    async fn apply(&self, changes: Vec<Change>) -> StoreResult<usize>;
}
