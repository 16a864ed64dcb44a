use super::{AppError, AppResult};
use crate::domain::{NewTask, Task, TaskId};
use crate::ports::{StoreError, TaskListSubscription, TaskStore};
use std::sync::Arc;

pub struct TaskService {
    store: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    /// Register a new task for `owner`. Empty text never reaches the
    /// store.
    pub async fn register_task(&self, text: &str, owner: &str, public: bool) -> AppResult<Task> {
        if text.trim().is_empty() {
            return Err(AppError::EmptyInput);
        }

        let task = self
            .store
            .create_task(NewTask {
                text: text.to_string(),
                owner: owner.to_string(),
                public,
            })
            .await?;
        Ok(task)
    }

    /// Standing live query over the owner's tasks, newest first. The
    /// returned handle releases the listener when dropped.
    pub async fn owner_task_feed(&self, owner: &str) -> AppResult<TaskListSubscription> {
        Ok(self.store.subscribe_by_owner(owner).await?)
    }

    /// Delete a task on behalf of `requester`. Only the owner may delete;
    /// deleting an already-absent task is a no-op. The dashboard does not
    /// wait on this call for its list update - the live query re-fires
    /// once the store applies the delete.
    pub async fn delete_task(&self, id: &TaskId, requester: &str) -> AppResult<()> {
        let Some(task) = self.store.get_task(id).await? else {
            return Ok(());
        };
        if task.owner != requester {
            return Err(AppError::Forbidden);
        }
        match self.store.delete_task(id).await {
            // Another client won the race; the list converges either way.
            Err(StoreError::NotFound(_)) => Ok(()),
            result => Ok(result?),
        }
    }

    /// Fetch a task for the public detail page. Private tasks and unknown
    /// ids are indistinguishable to the caller: both come back `None`.
    pub async fn public_task(&self, id: &TaskId) -> AppResult<Option<Task>> {
        let task = self.store.get_task(id).await?;
        Ok(task.filter(Task::is_visible_to_visitors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskId;
    use crate::ports::MockTaskStore;
    use chrono::Utc;

    fn stored_task(id: &str, owner: &str, public: bool) -> Task {
        Task {
            id: TaskId(id.to_string()),
            text: "water the plants".to_string(),
            owner: owner.to_string(),
            public,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn empty_text_is_rejected_without_a_store_write() {
        // No expectations set: any store call would panic the mock.
        let service = TaskService::new(Arc::new(MockTaskStore::new()));

        for text in ["", "   ", "\n\t"] {
            let result = service.register_task(text, "ana@example.com", false).await;
            assert!(matches!(result, Err(AppError::EmptyInput)));
        }
    }

    #[tokio::test]
    async fn register_passes_owner_and_visibility_through() {
        let mut store = MockTaskStore::new();
        store
            .expect_create_task()
            .withf(|new_task: &NewTask| {
                new_task.text == "buy milk"
                    && new_task.owner == "ana@example.com"
                    && new_task.public
            })
            .once()
            .returning(|new_task| {
                Ok(Task {
                    id: TaskId("t1".to_string()),
                    text: new_task.text,
                    owner: new_task.owner,
                    public: new_task.public,
                    created_at: Utc::now(),
                })
            });

        let service = TaskService::new(Arc::new(store));
        let task = service
            .register_task("buy milk", "ana@example.com", true)
            .await
            .unwrap();
        assert!(task.public);
    }

    #[tokio::test]
    async fn only_the_owner_may_delete() {
        let mut store = MockTaskStore::new();
        store
            .expect_get_task()
            .returning(|_| Ok(Some(stored_task("t1", "ana@example.com", false))));

        let service = TaskService::new(Arc::new(store));
        let result = service.delete_task(&"t1".into(), "bob@example.com").await;
        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn owner_delete_reaches_the_store() {
        let mut store = MockTaskStore::new();
        store
            .expect_get_task()
            .returning(|_| Ok(Some(stored_task("t1", "ana@example.com", false))));
        store
            .expect_delete_task()
            .withf(|id: &TaskId| id.0 == "t1")
            .once()
            .returning(|_| Ok(()));

        let service = TaskService::new(Arc::new(store));
        service
            .delete_task(&"t1".into(), "ana@example.com")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn deleting_an_absent_task_is_a_noop() {
        let mut store = MockTaskStore::new();
        store.expect_get_task().returning(|_| Ok(None));

        let service = TaskService::new(Arc::new(store));
        service
            .delete_task(&"gone".into(), "ana@example.com")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn private_and_unknown_tasks_look_identical_to_visitors() {
        let mut store = MockTaskStore::new();
        store
            .expect_get_task()
            .withf(|id: &TaskId| id.0 == "private")
            .returning(|_| Ok(Some(stored_task("private", "ana@example.com", false))));
        store
            .expect_get_task()
            .withf(|id: &TaskId| id.0 == "unknown")
            .returning(|_| Ok(None));

        let service = TaskService::new(Arc::new(store));
        assert_eq!(service.public_task(&"private".into()).await.unwrap(), None);
        assert_eq!(service.public_task(&"unknown".into()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn store_failure_on_create_propagates() {
        let mut store = MockTaskStore::new();
        store
            .expect_create_task()
            .returning(|_| Err(StoreError::Backend("connection reset".to_string())));

        let service = TaskService::new(Arc::new(store));
        let result = service.register_task("buy milk", "ana@example.com", false).await;
        assert!(matches!(result, Err(AppError::Store(_))));
    }

    #[tokio::test]
    async fn losing_a_delete_race_is_not_an_error() {
        let mut store = MockTaskStore::new();
        store
            .expect_get_task()
            .returning(|_| Ok(Some(stored_task("t1", "ana@example.com", false))));
        store
            .expect_delete_task()
            .returning(|id| Err(StoreError::NotFound(id.0.clone())));

        let service = TaskService::new(Arc::new(store));
        service
            .delete_task(&"t1".into(), "ana@example.com")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn public_task_is_returned_to_visitors() {
        let mut store = MockTaskStore::new();
        store
            .expect_get_task()
            .returning(|_| Ok(Some(stored_task("t1", "ana@example.com", true))));

        let service = TaskService::new(Arc::new(store));
        let task = service.public_task(&"t1".into()).await.unwrap().unwrap();
        assert_eq!(task.id.0, "t1");
    }
}
