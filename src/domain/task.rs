use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub String);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        TaskId(s)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        TaskId(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    /// Email of the user who created the task.
    pub owner: String,
    /// Public tasks are reachable at `/task/{id}` by anyone with the link.
    pub public: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Path at which a public task can be shared, relative to the base URL.
    pub fn share_path(&self) -> String {
        format!("/task/{}", self.id)
    }

    /// Business rule: a task is readable on the detail page only when public.
    pub fn is_visible_to_visitors(&self) -> bool {
        self.public
    }
}

/// Fields accepted when registering a new task. The id and creation
/// timestamp are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub text: String,
    pub owner: String,
    pub public: bool,
}
