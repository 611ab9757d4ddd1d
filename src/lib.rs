// ============================================================================
// HBNB console library
// ============================================================================

pub mod config;
pub mod console;
pub mod core;
pub mod models;
pub mod storage;

// Re-export main types for convenience
pub use config::ConsoleConfig;
pub use console::{Command, Console, Control};
pub use crate::core::{HbnbError, Result, Value};
pub use models::{ClassName, Record};
pub use storage::{FileStorage, Storage, StoreState};
