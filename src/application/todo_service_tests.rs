#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::super::todo_service::{ServiceError, TodoService, TodoServiceImpl};
    use crate::domain::{
        store::{Change, StoreError, StoreResult, TodoStore},
        todo::{TodoId, TodoItem},
    };
    use crate::infrastructure::memory_store::MemoryTodoStore;
    use async_trait::async_trait;

    /// Wraps the memory store and records every batch handed to `apply`.
    #[derive(Clone, Default)]
    struct RecordingStore {
        inner: MemoryTodoStore,
        commits: Arc<Mutex<Vec<Vec<Change>>>>,
    }

    #[async_trait]
    impl TodoStore for RecordingStore {
        async fn init(&self) -> StoreResult<()> { Ok(()) }
        async fn all(&self) -> StoreResult<Vec<TodoItem>> { self.inner.all().await }
        async fn find(&self, id: TodoId) -> StoreResult<Option<TodoItem>> { self.inner.find(id).await }
        async fn apply(&self, changes: Vec<Change>) -> StoreResult<usize> {
            self.commits.lock().unwrap().push(changes.clone());
            self.inner.apply(changes).await
        }
    }

    /// Finds succeed against a fixed item; every commit fails.
    struct BrokenStore;

    #[async_trait]
    impl TodoStore for BrokenStore {
        async fn init(&self) -> StoreResult<()> { Ok(()) }
        async fn all(&self) -> StoreResult<Vec<TodoItem>> { Err(StoreError::Database(sqlx::Error::PoolClosed)) }
        async fn find(&self, id: TodoId) -> StoreResult<Option<TodoItem>> {
            Ok((id == TodoId(1)).then(|| TodoItem::new(1, "pinned", false)))
        }
        async fn apply(&self, _changes: Vec<Change>) -> StoreResult<usize> { Err(StoreError::Database(sqlx::Error::PoolClosed)) }
    }

    fn service() -> TodoServiceImpl<MemoryTodoStore> { TodoServiceImpl::new(Arc::new(MemoryTodoStore::new())) }

    #[tokio::test]
    async fn unit_save_and_get() {
        let service = service();
        service.save(TodoItem::new(1, "buy milk", false)).await.unwrap();
        let got = service.get(TodoId(1)).await.unwrap();
        assert_eq!(got, TodoItem::new(1, "buy milk", false));
    }

    #[tokio::test]
    async fn unit_missing_ids_are_not_found() {
        let service = service();
        assert!(matches!(service.get(TodoId(999)).await, Err(ServiceError::NotFound(TodoId(999)))));
        assert!(matches!(service.remove(TodoId(999)).await, Err(ServiceError::NotFound(TodoId(999)))));
    }

    #[tokio::test]
    async fn unit_save_replaces_instead_of_merging() {
        let service = service();
        service.save(TodoItem::new(1, "buy milk", false)).await.unwrap();
        service.save(TodoItem::new(1, "buy milk", true)).await.unwrap();
        service.save(TodoItem::new(1, "", true)).await.unwrap();

        assert_eq!(service.get(TodoId(1)).await.unwrap(), TodoItem::new(1, "", true));
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unit_identical_saves_keep_one_record() {
        let service = service();
        let item = TodoItem::new(4, "same", false);
        service.save(item.clone()).await.unwrap();
        service.save(item.clone()).await.unwrap();
        assert_eq!(service.list().await.unwrap(), vec![item]);
    }

    #[tokio::test]
    async fn unit_remove_is_terminal_until_saved_again() {
        let service = service();
        service.save(TodoItem::new(5, "five", false)).await.unwrap();
        service.remove(TodoId(5)).await.unwrap();
        assert!(matches!(service.get(TodoId(5)).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(service.remove(TodoId(5)).await, Err(ServiceError::NotFound(_))));

        service.save(TodoItem::new(5, "five again", true)).await.unwrap();
        assert_eq!(service.get(TodoId(5)).await.unwrap().name, "five again");
    }

    #[tokio::test]
    async fn unit_list_reflects_each_mutation() {
        let service = service();
        assert!(service.list().await.unwrap().is_empty());
        for (id, name) in [(1, "a"), (2, "b"), (3, "c")] {
            service.save(TodoItem::new(id, name, id % 2 == 0)).await.unwrap();
        }
        assert_eq!(service.list().await.unwrap(), vec![
            TodoItem::new(1, "a", false),
            TodoItem::new(2, "b", true),
            TodoItem::new(3, "c", false),
        ]);

        service.remove(TodoId(2)).await.unwrap();
        assert_eq!(service.list().await.unwrap(), vec![TodoItem::new(1, "a", false), TodoItem::new(3, "c", false)]);
    }

    #[tokio::test]
    async fn unit_zero_id_is_always_an_insert() {
        let service = service();
        service.save(TodoItem::new(0, "first", false)).await.unwrap();
        service.save(TodoItem::new(0, "second", false)).await.unwrap();

        let all = service.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|t| !t.id.is_unassigned()));
    }

    #[tokio::test]
    async fn unit_every_save_commits_and_missing_remove_does_not() {
        let store = Arc::new(RecordingStore::default());
        let service = TodoServiceImpl::new(store.clone());
        let item = TodoItem::new(2, "x", false);

        service.save(item.clone()).await.unwrap();
        service.save(item.clone()).await.unwrap();
        assert!(matches!(service.remove(TodoId(77)).await, Err(ServiceError::NotFound(TodoId(77)))));

        let commits = store.commits.lock().unwrap().clone();
        assert_eq!(commits, vec![
            vec![Change::Add(item.clone())],
            vec![Change::Remove(TodoId(2)), Change::Add(item)],
        ]);
    }

    #[tokio::test]
    async fn unit_generated_id_overflow_is_a_store_error() {
        let service = service();
        service.save(TodoItem::new(i64::MAX, "max", false)).await.unwrap();
        assert!(matches!(
            service.save(TodoItem::new(0, "next", false)).await,
            Err(ServiceError::Store(StoreError::KeySpaceExhausted))
        ));
        assert_eq!(service.list().await.unwrap(), vec![TodoItem::new(i64::MAX, "max", false)]);
    }

    #[tokio::test]
    async fn unit_store_failures_propagate() {
        let service = TodoServiceImpl::new(Arc::new(BrokenStore));
        assert!(matches!(service.list().await, Err(ServiceError::Store(_))));
        assert!(matches!(service.save(TodoItem::new(2, "x", false)).await, Err(ServiceError::Store(_))));
        assert!(matches!(service.remove(TodoId(1)).await, Err(ServiceError::Store(_))));
        // lookups that never reach a commit still report not found
        assert!(matches!(service.remove(TodoId(3)).await, Err(ServiceError::NotFound(_))));
    }
}
