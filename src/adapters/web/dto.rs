use crate::domain::{Comment, Task};
use serde::{Deserialize, Serialize};

// DTOs for the JSON endpoints and the dashboard WebSocket.

#[derive(Debug, Serialize)]
pub struct TaskDto {
    pub id: String,
    pub text: String,
    pub public: bool,
    /// Path of the detail page; the dashboard prefixes the base URL to
    /// build the share link.
    pub share_path: String,
    pub created_at: String,
}

impl From<Task> for TaskDto {
    fn from(task: Task) -> Self {
        let share_path = task.share_path();
        Self {
            id: task.id.0,
            text: task.text,
            public: task.public,
            share_path,
            created_at: task.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommentDto {
    pub id: String,
    pub text: String,
    pub author_email: String,
    pub author_name: String,
    pub created_at: String,
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id.0,
            text: comment.text,
            author_email: comment.author_email,
            author_name: comment.author_name,
            created_at: comment.created_at.to_rfc3339(),
        }
    }
}

// Request DTOs

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub text: String,
    #[serde(default)]
    pub public: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub name: String,
}
