use crate::storage::DEFAULT_FILE_PATH;
use std::path::PathBuf;

pub const DEFAULT_PROMPT: &str = "(hbnb) ";

/// Console session configuration
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// JSON file backing the object store
    pub file_path: PathBuf,

    /// Prompt shown before each line in interactive mode
    pub prompt: String,

    /// Force interactive (`Some(true)`) or batch (`Some(false)`) mode;
    /// `None` decides from whether stdin is a terminal
    pub interactive: Option<bool>,
}

impl ConsoleConfig {
    pub fn new() -> Self {
        Self {
            file_path: PathBuf::from(DEFAULT_FILE_PATH),
            prompt: DEFAULT_PROMPT.to_string(),
            interactive: None,
        }
    }

    /// Set the backing file
    pub fn file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = path.into();
        self
    }

    /// Set the prompt
    pub fn prompt(mut self, prompt: &str) -> Self {
        self.prompt = prompt.to_string();
        self
    }

    /// Force interactive or batch mode
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = Some(interactive);
        self
    }

    /// The prompt to print, if any, given whether stdin is a terminal
    pub fn effective_prompt(&self, stdin_is_terminal: bool) -> Option<&str> {
        self.interactive
            .unwrap_or(stdin_is_terminal)
            .then_some(self.prompt.as_str())
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::new()
    }
}
