use crate::core::{HbnbError, Value};

/// What a console line asks for. Produced by the parser, matched
/// exhaustively by the interpreter.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Blank line
    Empty,
    Create(Target),
    Show(Target),
    All(Target),
    Count(Target),
    Destroy(Target),
    Update(Target, UpdateArgs),
    Help(Option<String>),
    /// `quit` or `EOF`
    Quit,
    /// Anything unrecognized, carrying the original line
    Unknown(String),
}

/// Class name and instance id as typed; validated at dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Target {
    pub class: Option<String>,
    pub id: Option<String>,
}

impl Target {
    pub fn new(class: Option<String>, id: Option<String>) -> Self {
        Self { class, id }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateArgs {
    /// Complete attribute/value pairs, in input order
    pub assignments: Vec<(String, Value)>,
    /// Reported after the assignments are applied
    pub missing: Option<HbnbError>,
}
