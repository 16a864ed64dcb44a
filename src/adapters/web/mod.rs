pub mod auth;
pub mod dashboard;
pub mod dto;
pub mod home;
pub mod render;
pub mod task_detail;

use crate::application::{AppError, CommentService, TaskService};
use crate::ports::SessionProvider;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared dependencies for every handler. The store-backed services are
/// created once at startup and injected here; handlers never reach a
/// module-level singleton.
#[derive(Clone)]
pub struct AppState {
    pub tasks: Arc<TaskService>,
    pub comments: Arc<CommentService>,
    pub sessions: Arc<dyn SessionProvider>,
    /// Public base URL, used by the dashboard to build share links.
    pub base_url: String,
}

/// Application errors mapped onto the JSON endpoints' status codes.
///
/// Empty input is dropped without feedback: the client keeps whatever is
/// in the form and nothing was written. Store failures are logged and the
/// client leaves its state unchanged.
pub struct ApiError(AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            AppError::EmptyInput => {
                tracing::debug!("dropping submission with empty text");
                StatusCode::NO_CONTENT.into_response()
            }
            AppError::Forbidden => StatusCode::FORBIDDEN.into_response(),
            err => {
                tracing::error!(error = %err, "store operation failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::home_page))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/dashboard", get(dashboard::dashboard_page))
        .route("/dashboard/ws", get(dashboard::dashboard_ws))
        .route("/task/{id}", get(task_detail::task_detail_page))
        .route("/api/tasks", post(dashboard::create_task))
        .route("/api/tasks/{id}", delete(dashboard::delete_task))
        .route("/api/tasks/{id}/comments", post(task_detail::create_comment))
        .route("/api/comments/{id}", delete(task_detail::delete_comment))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
