use crate::core::Result;
use crate::models::{ClassName, Record};

/// Storage trait the console drives - keeps the interpreter independent of
/// where records are persisted.
pub trait Storage {
    /// Insert or overwrite the record under its `ClassName.id` key
    fn add(&mut self, record: Record);

    /// Records of one class, or every record when `class` is `None`
    fn all(&self, class: Option<ClassName>) -> Vec<&Record>;

    fn get(&self, class: ClassName, id: &str) -> Option<&Record>;

    fn get_mut(&mut self, class: ClassName, id: &str) -> Option<&mut Record>;

    /// Remove a record by composite key; absent keys are a no-op
    fn delete(&mut self, key: &str) -> Option<Record>;

    /// Write every record to the backing medium, replacing what was there
    fn save(&self) -> Result<()>;

    /// Replace the in-memory contents with what the backing medium holds
    fn reload(&mut self) -> Result<()>;

    fn count(&self, class: ClassName) -> usize {
        self.all(Some(class)).len()
    }
}
