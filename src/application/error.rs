use crate::ports::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Empty or whitespace-only input. Call sites swallow this: the
    /// submission is dropped without feedback and the form is left as-is.
    #[error("Input text is empty")]
    EmptyInput,

    /// The requester is not the owner of the record they tried to change.
    #[error("Operation not permitted for this user")]
    Forbidden,
}

pub type AppResult<T> = Result<T, AppError>;
