use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{
    store::{Change, StoreError, StoreResult, TodoStore},
    todo::{TodoId, TodoItem},
};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<TodoId, TodoItem>,
    // highest key ever stored; next generated key is one above it
    last_id: i64,
}

/// Row state before a change touched it, for rolling a failed batch back.
type Undo = (TodoId, Option<TodoItem>);

impl Table {
    fn apply(&mut self, change: Change) -> StoreResult<Undo> {
        match change {
            Change::Remove(id) => Ok((id, self.rows.remove(&id))),
            Change::Add(mut item) => {
                if item.id.is_unassigned() {
                    let next = self.last_id.checked_add(1).ok_or(StoreError::KeySpaceExhausted)?;
                    item.id = TodoId(next);
                } else if self.rows.contains_key(&item.id) {
                    return Err(StoreError::Conflict(item.id));
                }
                self.last_id = self.last_id.max(item.id.0);
                let id = item.id;
                Ok((id, self.rows.insert(id, item)))
            }
        }
    }

    fn rollback(&mut self, undo: Vec<Undo>, last_id: i64) {
        for (id, previous) in undo.into_iter().rev() {
            match previous {
                Some(item) => { self.rows.insert(id, item); }
                None => { self.rows.remove(&id); }
            }
        }
        self.last_id = last_id;
    }
}

/// Process-wide in-memory store. Clones share the same table.
#[derive(Clone, Default)]
pub struct MemoryTodoStore {
    table: Arc<RwLock<Table>>,
}

impl MemoryTodoStore {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn init(&self) -> StoreResult<()> { Ok(()) }

    async fn all(&self) -> StoreResult<Vec<TodoItem>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find(&self, id: TodoId) -> StoreResult<Option<TodoItem>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn apply(&self, changes: Vec<Change>) -> StoreResult<usize> {
        let mut table = self.table.write().await;
        let last_id = table.last_id;
        let mut undo = Vec::with_capacity(changes.len());
        for change in changes {
            match table.apply(change) {
                Ok(entry) => undo.push(entry),
                Err(err) => {
                    table.rollback(undo, last_id);
                    return Err(err);
                }
            }
        }
        Ok(undo.len())
    }
}
