pub mod comment_store;
pub mod config_store;
pub mod session;
pub mod task_store;

pub use comment_store::*;
pub use config_store::*;
pub use session::*;
pub use task_store::*;
