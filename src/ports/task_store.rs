use crate::domain::{NewTask, Task, TaskId};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    // Reserved for adapters backed by a remote store
    #[allow(dead_code)]
    #[error("Backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A standing live query over one owner's tasks.
///
/// Yields the full current result set on subscribe and again after every
/// create or delete that affects the matched set, from any client. No
/// incremental diffing: callers replace their whole list each time.
///
/// Dropping the subscription releases the underlying listener, so a view
/// that goes away cannot leak a stale callback.
pub struct TaskListSubscription {
    receiver: mpsc::UnboundedReceiver<Vec<Task>>,
    abort: AbortHandle,
}

impl TaskListSubscription {
    pub fn new(receiver: mpsc::UnboundedReceiver<Vec<Task>>, abort: AbortHandle) -> Self {
        Self { receiver, abort }
    }

    /// Next full snapshot of the matched set, or `None` once the store
    /// side has shut down.
    pub async fn next(&mut self) -> Option<Vec<Task>> {
        self.receiver.recv().await
    }
}

impl Drop for TaskListSubscription {
    fn drop(&mut self) {
        self.abort.abort();
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Persist a new task; the store assigns the id and creation timestamp.
    async fn create_task(&self, new_task: NewTask) -> StoreResult<Task>;

    async fn get_task(&self, id: &TaskId) -> StoreResult<Option<Task>>;

    /// Live query: all tasks where `owner == email`, ordered by creation
    /// time descending.
    async fn subscribe_by_owner(&self, owner: &str) -> StoreResult<TaskListSubscription>;

    async fn delete_task(&self, id: &TaskId) -> StoreResult<()>;
}
