use serde::Serialize;
use std::fmt;

/// Attribute value carried by an entity record.
///
/// Serialized untagged, so the persisted document holds plain JSON scalars
/// and arrays rather than `{"Integer": 3}` wrappers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<Value>),
}

impl Value {
    /// Type an unquoted console word: integer, then float, then text.
    pub fn infer(raw: &str) -> Self {
        if let Ok(i) = raw.parse::<i64>() {
            return Self::Integer(i);
        }
        match raw.parse::<f64>() {
            // "inf" and "nan" parse as floats but are meant as words
            Ok(f) if f.is_finite() => Self::Float(f),
            _ => Self::Text(raw.to_string()),
        }
    }

    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Boolean(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => Self::Float(n.as_f64().unwrap_or_default()),
            },
            serde_json::Value::String(s) => Self::Text(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from_json).collect())
            }
            obj @ serde_json::Value::Object(_) => Self::Text(obj.to_string()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

/// Renders the way values appear inside a record's string form:
/// text single-quoted, numbers bare, lists bracketed.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Integer(i) => write!(f, "{}", i),
            // Debug keeps the trailing ".0" on whole floats
            Self::Float(fl) => write!(f, "{:?}", fl),
            Self::Text(s) => write!(f, "'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}
