use crate::domain::{Comment, CommentId, NewComment, NewTask, Task, TaskId};
use crate::ports::{CommentStore, StoreError, StoreResult, TaskListSubscription, TaskStore};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use uuid::Uuid;

/// In-process document store backing both the tasks and comments
/// collections.
///
/// Created once at startup and injected into every adapter that needs it;
/// nothing reaches a module-level singleton. Live queries are built on a
/// broadcast change feed: every task write publishes the affected owner,
/// and each subscription re-runs its query and pushes the full result set
/// to its listener.
pub struct MemoryStore {
    tasks: Arc<DashMap<String, Task>>,
    comments: Arc<DashMap<String, Comment>>,
    task_changes: broadcast::Sender<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let (task_changes, _) = broadcast::channel(64);
        Self {
            tasks: Arc::new(DashMap::new()),
            comments: Arc::new(DashMap::new()),
            task_changes,
        }
    }

    fn notify_task_change(&self, owner: &str) {
        // Send only fails when no subscription is listening, which is fine.
        let _ = self.task_changes.send(owner.to_string());
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// One owner's tasks, newest first. Id is the tie-break so exact
/// timestamp collisions still order deterministically.
fn tasks_for_owner(tasks: &DashMap<String, Task>, owner: &str) -> Vec<Task> {
    let mut matched: Vec<Task> = tasks
        .iter()
        .filter(|entry| entry.value().owner == owner)
        .map(|entry| entry.value().clone())
        .collect();
    matched.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.0.cmp(&a.id.0))
    });
    matched
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn create_task(&self, new_task: NewTask) -> StoreResult<Task> {
        let task = Task {
            id: TaskId(Uuid::new_v4().to_string()),
            text: new_task.text,
            owner: new_task.owner,
            public: new_task.public,
            created_at: Utc::now(),
        };
        self.tasks.insert(task.id.0.clone(), task.clone());
        self.notify_task_change(&task.owner);
        Ok(task)
    }

    async fn get_task(&self, id: &TaskId) -> StoreResult<Option<Task>> {
        Ok(self.tasks.get(&id.0).map(|entry| entry.value().clone()))
    }

    async fn subscribe_by_owner(&self, owner: &str) -> StoreResult<TaskListSubscription> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut changes = self.task_changes.subscribe();
        let tasks = Arc::clone(&self.tasks);
        let owner = owner.to_string();

        let handle = tokio::spawn(async move {
            // Initial snapshot, then one push per matched-set change.
            if tx.send(tasks_for_owner(&tasks, &owner)).is_err() {
                return;
            }
            loop {
                match changes.recv().await {
                    Ok(changed_owner) if changed_owner == owner => {
                        if tx.send(tasks_for_owner(&tasks, &owner)).is_err() {
                            break;
                        }
                    }
                    Ok(_) => continue,
                    Err(broadcast::error::RecvError::Lagged(_)) => {
                        // Missed events collapse into a single refresh.
                        if tx.send(tasks_for_owner(&tasks, &owner)).is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        Ok(TaskListSubscription::new(rx, handle.abort_handle()))
    }

    async fn delete_task(&self, id: &TaskId) -> StoreResult<()> {
        match self.tasks.remove(&id.0) {
            Some((_, task)) => {
                self.notify_task_change(&task.owner);
                Ok(())
            }
            None => Err(StoreError::NotFound(id.0.clone())),
        }
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn create_comment(&self, new_comment: NewComment) -> StoreResult<Comment> {
        let comment = Comment {
            id: CommentId(Uuid::new_v4().to_string()),
            text: new_comment.text,
            task_id: new_comment.task_id,
            author_email: new_comment.author_email,
            author_name: new_comment.author_name,
            created_at: Utc::now(),
        };
        self.comments.insert(comment.id.0.clone(), comment.clone());
        Ok(comment)
    }

    async fn list_by_task(&self, task_id: &TaskId) -> StoreResult<Vec<Comment>> {
        Ok(self
            .comments
            .iter()
            .filter(|entry| entry.value().task_id == *task_id)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn get_comment(&self, id: &CommentId) -> StoreResult<Option<Comment>> {
        Ok(self.comments.get(&id.0).map(|entry| entry.value().clone()))
    }

    async fn delete_comment(&self, id: &CommentId) -> StoreResult<()> {
        match self.comments.remove(&id.0) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(id.0.clone())),
        }
    }
}
