use super::{ClassName, schema};
use crate::core::{HbnbError, Result, Value};
use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};
use serde_json::Map;
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// ISO-8601 with microseconds, no offset. Timestamps are always UTC.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Discriminator field naming the record's class in the persisted document.
pub const CLASS_FIELD: &str = "__class__";

/// Attributes the console never lets a user overwrite.
pub const PROTECTED_ATTRIBUTES: [&str; 4] = [CLASS_FIELD, "id", "created_at", "updated_at"];

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    class: ClassName,
    id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    attributes: BTreeMap<String, Value>,
}

impl Record {
    /// Fresh record with a v4 id and both timestamps set to now.
    pub fn new(class: ClassName) -> Self {
        let now = now();
        Self {
            class,
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            attributes: BTreeMap::new(),
        }
    }

    pub fn class(&self) -> ClassName {
        self.class
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Composite store key, `ClassName.id`.
    pub fn key(&self) -> String {
        storage_key(self.class, &self.id)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Set an attribute, coercing it to the class schema's declared type.
    /// Returns `false` without changing anything for protected names.
    pub fn set(&mut self, name: &str, value: Value) -> bool {
        if is_protected(name) {
            return false;
        }
        let value = schema::coerce(self.class, name, value);
        self.attributes.insert(name.to_string(), value);
        true
    }

    /// Refresh `updated_at`, never letting it fall behind `created_at`.
    pub fn touch(&mut self) {
        self.updated_at = now().max(self.created_at);
    }

    pub fn to_document(&self) -> Result<Map<String, serde_json::Value>> {
        let mut doc = Map::new();
        for (name, value) in &self.attributes {
            doc.insert(name.clone(), serde_json::to_value(value)?);
        }
        doc.insert("id".into(), self.id.clone().into());
        doc.insert("created_at".into(), format_timestamp(&self.created_at).into());
        doc.insert("updated_at".into(), format_timestamp(&self.updated_at).into());
        doc.insert(CLASS_FIELD.into(), self.class.as_str().into());
        Ok(doc)
    }

    pub fn from_document(mut doc: Map<String, serde_json::Value>) -> Result<Self> {
        let class_name = take_string(&mut doc, CLASS_FIELD)?
            .ok_or_else(|| HbnbError::CorruptRecord(format!("missing '{}'", CLASS_FIELD)))?;
        let class = class_name
            .parse::<ClassName>()
            .map_err(|_| HbnbError::CorruptRecord(format!("unknown class '{}'", class_name)))?;

        let id = take_string(&mut doc, "id")?
            .ok_or_else(|| HbnbError::CorruptRecord(format!("{} record without id", class)))?;

        let created_at = match take_string(&mut doc, "created_at")? {
            Some(raw) => parse_timestamp(&raw)?,
            None => now(),
        };
        let updated_at = match take_string(&mut doc, "updated_at")? {
            Some(raw) => parse_timestamp(&raw)?,
            None => created_at,
        };

        let attributes = doc
            .into_iter()
            .map(|(name, json)| (name, Value::from_json(json)))
            .collect();

        Ok(Self {
            class,
            id,
            created_at,
            updated_at: updated_at.max(created_at),
            attributes,
        })
    }
}

/// `[Class] (id) {'id': ..., 'created_at': ..., 'updated_at': ..., <attributes>}`
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] ({}) {{'id': {}, 'created_at': '{}', 'updated_at': '{}'",
            self.class,
            self.id,
            Value::Text(self.id.clone()),
            format_timestamp(&self.created_at),
            format_timestamp(&self.updated_at),
        )?;
        for (name, value) in &self.attributes {
            write!(f, ", '{}': {}", name, value)?;
        }
        write!(f, "}}")
    }
}

pub fn storage_key(class: ClassName, id: &str) -> String {
    format!("{}.{}", class, id)
}

pub fn is_protected(name: &str) -> bool {
    PROTECTED_ATTRIBUTES.contains(&name)
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| HbnbError::CorruptRecord(format!("bad timestamp '{}': {}", raw, e)))
}

// Truncated so a save/reload cycle reproduces the exact same value.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn take_string(doc: &mut Map<String, serde_json::Value>, field: &str) -> Result<Option<String>> {
    match doc.remove(field) {
        None => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(HbnbError::CorruptRecord(format!(
            "field '{}' should be a string, found {}",
            field, other
        ))),
    }
}
