use super::StoreResult;
use crate::domain::{Comment, CommentId, NewComment, TaskId};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Persist a new comment and return the stored record, id included,
    /// so the submitting page can append it to its local list. The detail
    /// page holds no live subscription; this returned record is the only
    /// way the author sees their comment without a reload.
    async fn create_comment(&self, new_comment: NewComment) -> StoreResult<Comment>;

    /// All comments attached to a task. No ordering is guaranteed.
    async fn list_by_task(&self, task_id: &TaskId) -> StoreResult<Vec<Comment>>;

    async fn get_comment(&self, id: &CommentId) -> StoreResult<Option<Comment>>;

    async fn delete_comment(&self, id: &CommentId) -> StoreResult<()>;
}
