use super::store::{Change, StoreResult, TodoStore};
use super::todo::{TodoId, TodoItem};

/// Unit of work over a [`TodoStore`]. Nothing staged here is visible to other
/// callers until [`commit`](TodoContext::commit); dropping the context
/// discards pending changes.
pub struct TodoContext<'a, S: TodoStore + ?Sized> {
    store: &'a S,
    pending: Vec<Change>,
}

impl<'a, S: TodoStore + ?Sized> TodoContext<'a, S> {
    pub fn new(store: &'a S) -> Self { Self { store, pending: Vec::new() } }

    /// Looks `id` up in the pending changes first, then in the store.
    pub async fn find(&self, id: TodoId) -> StoreResult<Option<TodoItem>> {
        for change in self.pending.iter().rev() {
            match change {
                Change::Add(item) if item.id == id => return Ok(Some(item.clone())),
                Change::Remove(removed) if *removed == id => return Ok(None),
                _ => {}
            }
        }
        self.store.find(id).await
    }

    pub fn add(&mut self, item: TodoItem) { self.pending.push(Change::Add(item)); }

    pub fn remove(&mut self, item: &TodoItem) { self.pending.push(Change::Remove(item.id)); }

    #[cfg(test)]
    pub fn has_changes(&self) -> bool { !self.pending.is_empty() }

    pub async fn commit(self) -> StoreResult<usize> {
        if self.pending.is_empty() { return Ok(0); }
        self.store.apply(self.pending).await
    }
}
