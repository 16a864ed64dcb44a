use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommentId(pub String);

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CommentId {
    fn from(s: String) -> Self {
        CommentId(s)
    }
}

impl From<&str> for CommentId {
    fn from(s: &str) -> Self {
        CommentId(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub text: String,
    /// Task the comment is attached to. A foreign reference, not an
    /// ownership link; a task has many comments.
    pub task_id: super::TaskId,
    /// Author identity, captured from the active session at creation.
    pub author_email: String,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Business rule: only the author may delete their comment.
    pub fn is_deletable_by(&self, email: &str) -> bool {
        self.author_email == email
    }

    /// Format the time since creation for display.
    pub fn time_since_created(&self) -> String {
        let now = Utc::now();
        let duration = now.signed_duration_since(self.created_at);

        if duration.num_days() > 0 {
            format!("{} days ago", duration.num_days())
        } else if duration.num_hours() > 0 {
            format!("{} hours ago", duration.num_hours())
        } else if duration.num_minutes() > 0 {
            format!("{} minutes ago", duration.num_minutes())
        } else {
            "Just now".to_string()
        }
    }
}

/// Fields accepted when posting a new comment. The id and creation
/// timestamp are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub text: String,
    pub task_id: super::TaskId,
    pub author_email: String,
    pub author_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(author: &str) -> Comment {
        Comment {
            id: CommentId("c1".into()),
            text: "nice".to_string(),
            task_id: "t1".into(),
            author_email: author.to_string(),
            author_name: "Ana".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn only_author_may_delete() {
        let c = comment("ana@example.com");
        assert!(c.is_deletable_by("ana@example.com"));
        assert!(!c.is_deletable_by("bob@example.com"));
    }

    #[test]
    fn fresh_comment_displays_just_now() {
        assert_eq!(comment("ana@example.com").time_since_created(), "Just now");
    }
}
