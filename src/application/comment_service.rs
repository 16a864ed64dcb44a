use super::{AppError, AppResult};
use crate::domain::{Comment, CommentId, NewComment, SessionUser, TaskId};
use crate::ports::{CommentStore, StoreError};
use std::sync::Arc;

pub struct CommentService {
    store: Arc<dyn CommentStore>,
}

impl CommentService {
    pub fn new(store: Arc<dyn CommentStore>) -> Self {
        Self { store }
    }

    /// Post a comment as the signed-in `author`. The author's email and
    /// display name are captured from the session at creation time. The
    /// stored record is returned so the page can append it to its local
    /// list without refetching.
    pub async fn post_comment(
        &self,
        task_id: &TaskId,
        text: &str,
        author: &SessionUser,
    ) -> AppResult<Comment> {
        if text.trim().is_empty() {
            return Err(AppError::EmptyInput);
        }

        let comment = self
            .store
            .create_comment(NewComment {
                text: text.to_string(),
                task_id: task_id.clone(),
                author_email: author.email.clone(),
                author_name: author.name.clone(),
            })
            .await?;
        Ok(comment)
    }

    pub async fn comments_for_task(&self, task_id: &TaskId) -> AppResult<Vec<Comment>> {
        Ok(self.store.list_by_task(task_id).await?)
    }

    /// Delete a comment on behalf of `requester`. Hiding the delete button
    /// from other viewers is a usability hint; the authorization check
    /// lives here.
    pub async fn delete_comment(&self, id: &CommentId, requester: &str) -> AppResult<()> {
        let Some(comment) = self.store.get_comment(id).await? else {
            return Ok(());
        };
        if !comment.is_deletable_by(requester) {
            return Err(AppError::Forbidden);
        }
        match self.store.delete_comment(id).await {
            Err(StoreError::NotFound(_)) => Ok(()),
            result => Ok(result?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockCommentStore;
    use chrono::Utc;

    fn ana() -> SessionUser {
        SessionUser {
            email: "ana@example.com".to_string(),
            name: "Ana".to_string(),
        }
    }

    fn stored_comment(id: &str, author_email: &str) -> Comment {
        Comment {
            id: CommentId(id.to_string()),
            text: "nice".to_string(),
            task_id: "t1".into(),
            author_email: author_email.to_string(),
            author_name: "Ana".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn empty_comment_never_reaches_the_store() {
        let service = CommentService::new(Arc::new(MockCommentStore::new()));

        let result = service.post_comment(&"t1".into(), "  ", &ana()).await;
        assert!(matches!(result, Err(AppError::EmptyInput)));
    }

    #[tokio::test]
    async fn posted_comment_carries_the_session_identity() {
        let mut store = MockCommentStore::new();
        store
            .expect_create_comment()
            .withf(|new_comment: &NewComment| {
                new_comment.author_email == "ana@example.com"
                    && new_comment.author_name == "Ana"
                    && new_comment.task_id.0 == "t1"
            })
            .once()
            .returning(|new_comment| {
                Ok(Comment {
                    id: CommentId("c1".to_string()),
                    text: new_comment.text,
                    task_id: new_comment.task_id,
                    author_email: new_comment.author_email,
                    author_name: new_comment.author_name,
                    created_at: Utc::now(),
                })
            });

        let service = CommentService::new(Arc::new(store));
        let comment = service
            .post_comment(&"t1".into(), "great idea", &ana())
            .await
            .unwrap();
        assert_eq!(comment.id.0, "c1");
        assert_eq!(comment.author_name, "Ana");
    }

    #[tokio::test]
    async fn only_the_author_may_delete() {
        let mut store = MockCommentStore::new();
        store
            .expect_get_comment()
            .returning(|_| Ok(Some(stored_comment("c1", "ana@example.com"))));

        let service = CommentService::new(Arc::new(store));
        let result = service.delete_comment(&"c1".into(), "bob@example.com").await;
        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn author_delete_reaches_the_store() {
        let mut store = MockCommentStore::new();
        store
            .expect_get_comment()
            .returning(|_| Ok(Some(stored_comment("c1", "ana@example.com"))));
        store
            .expect_delete_comment()
            .withf(|id: &CommentId| id.0 == "c1")
            .once()
            .returning(|_| Ok(()));

        let service = CommentService::new(Arc::new(store));
        service
            .delete_comment(&"c1".into(), "ana@example.com")
            .await
            .unwrap();
    }
}
