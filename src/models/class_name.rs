use crate::core::HbnbError;
use std::fmt;
use std::str::FromStr;

/// The closed registry of entity classes the console accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClassName {
    BaseModel,
    User,
    State,
    City,
    Amenity,
    Place,
    Review,
}

impl ClassName {
    pub const ALL: [ClassName; 7] = [
        ClassName::BaseModel,
        ClassName::User,
        ClassName::State,
        ClassName::City,
        ClassName::Amenity,
        ClassName::Place,
        ClassName::Review,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BaseModel => "BaseModel",
            Self::User => "User",
            Self::State => "State",
            Self::City => "City",
            Self::Amenity => "Amenity",
            Self::Place => "Place",
            Self::Review => "Review",
        }
    }
}

impl FromStr for ClassName {
    type Err = HbnbError;

    /// Exact, case-sensitive match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|class| class.as_str() == s)
            .ok_or(HbnbError::UnknownClass)
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
