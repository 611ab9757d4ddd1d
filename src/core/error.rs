use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HbnbError {
    #[error("** class name missing **")]
    MissingClassName,

    #[error("** class doesn't exist **")]
    UnknownClass,

    #[error("** instance id missing **")]
    MissingIdentifier,

    #[error("** no instance found **")]
    UnknownInstance,

    #[error("** attribute name missing **")]
    MissingAttributeName,

    #[error("** value missing **")]
    MissingAttributeValue,

    #[error("*** Unknown syntax: {0}")]
    UnrecognizedCommand(String),

    #[error("Corrupt record: {0}")]
    CorruptRecord(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl HbnbError {
    /// Errors the console prints and then keeps reading input.
    pub fn is_user_facing(&self) -> bool {
        !matches!(
            self,
            Self::CorruptRecord(_) | Self::Serialization(_) | Self::Io(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, HbnbError>;

impl From<std::io::Error> for HbnbError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for HbnbError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<rustyline::error::ReadlineError> for HbnbError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<tempfile::PersistError> for HbnbError {
    fn from(err: tempfile::PersistError) -> Self {
        Self::Io(err.error.to_string())
    }
}
