//! Mapping literals for `update`, e.g. `{'first_name': "John", 'age': 89}`.
//!
//! The literal is JSON, except strings may also be single-quoted.

use crate::core::Value;
use serde_json::Map;

/// Parse a mapping literal into `(attribute, value)` pairs. `None` when the
/// text is not a well-formed object.
pub fn parse_mapping(raw: &str) -> Option<Vec<(String, Value)>> {
    let json = to_json(raw);
    let object: Map<String, serde_json::Value> = serde_json::from_str(&json).ok()?;
    Some(
        object
            .into_iter()
            .map(|(name, value)| (name, Value::from_json(value)))
            .collect(),
    )
}

/// Re-quote single-quoted strings as JSON strings; everything else is copied.
fn to_json(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    let mut quote: Option<char> = None;

    while let Some(c) = chars.next() {
        match (quote, c) {
            (None, '\'') | (None, '"') => {
                quote = Some(c);
                out.push('"');
            }
            (None, c) => out.push(c),

            (Some(_), '\\') => match chars.next() {
                Some('\'') => out.push('\''),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            },
            (Some(q), c) if c == q => {
                quote = None;
                out.push('"');
            }
            (Some('\''), '"') => out.push_str("\\\""),
            (Some(_), c) => out.push(c),
        }
    }

    out
}
