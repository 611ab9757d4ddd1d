pub mod engine;
pub mod file_storage;

pub use engine::Storage;
pub use file_storage::{DEFAULT_FILE_PATH, FileStorage, StoreState};
