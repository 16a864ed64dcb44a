pub mod comment;
pub mod task;
pub mod user;

pub use comment::*;
pub use task::*;
pub use user::*;
