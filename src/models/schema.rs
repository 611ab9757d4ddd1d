//! Declared attributes per entity class.
//!
//! Records may carry any attribute, but attributes named here are coerced to
//! their declared type when set from the console.

use super::ClassName;
use crate::core::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    Text,
    Integer,
    Float,
    TextList,
}

impl AttributeType {
    /// Coerce `value` to this type. Values that can't be represented are
    /// returned as given.
    pub fn cast(&self, value: Value) -> Value {
        match (self, value) {
            (Self::Text, Value::Text(s)) => Value::Text(s),
            (Self::Text, v @ Value::List(_)) => v,
            (Self::Text, Value::Null) => Value::Null,
            (Self::Text, Value::Float(f)) => Value::Text(format!("{:?}", f)),
            (Self::Text, Value::Integer(i)) => Value::Text(i.to_string()),
            (Self::Text, Value::Boolean(b)) => Value::Text(b.to_string()),

            (Self::Integer, Value::Float(f))
                if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 =>
            {
                Value::Integer(f as i64)
            }
            (Self::Integer, Value::Text(s)) => match s.trim().parse::<i64>() {
                Ok(i) => Value::Integer(i),
                Err(_) => Value::Text(s),
            },

            (Self::Float, Value::Integer(i)) => Value::Float(i as f64),
            (Self::Float, Value::Text(s)) => match s.trim().parse::<f64>() {
                Ok(f) if f.is_finite() => Value::Float(f),
                _ => Value::Text(s),
            },

            (Self::TextList, Value::List(items)) => Value::List(
                items.into_iter().map(|item| Self::Text.cast(item)).collect(),
            ),
            (Self::TextList, v @ Value::Text(_)) => Value::List(vec![v]),

            (_, v) => v,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Attribute {
    pub name: &'static str,
    pub attr_type: AttributeType,
}

const fn text(name: &'static str) -> Attribute {
    Attribute { name, attr_type: AttributeType::Text }
}

const fn integer(name: &'static str) -> Attribute {
    Attribute { name, attr_type: AttributeType::Integer }
}

const fn float(name: &'static str) -> Attribute {
    Attribute { name, attr_type: AttributeType::Float }
}

const USER: &[Attribute] = &[
    text("email"),
    text("password"),
    text("first_name"),
    text("last_name"),
];

const STATE: &[Attribute] = &[text("name")];

const CITY: &[Attribute] = &[text("state_id"), text("name")];

const AMENITY: &[Attribute] = &[text("name")];

const PLACE: &[Attribute] = &[
    text("city_id"),
    text("user_id"),
    text("name"),
    text("description"),
    integer("number_rooms"),
    integer("number_bathrooms"),
    integer("max_guest"),
    integer("price_by_night"),
    float("latitude"),
    float("longitude"),
    Attribute { name: "amenity_ids", attr_type: AttributeType::TextList },
];

const REVIEW: &[Attribute] = &[text("place_id"), text("user_id"), text("text")];

pub fn attributes(class: ClassName) -> &'static [Attribute] {
    match class {
        ClassName::BaseModel => &[],
        ClassName::User => USER,
        ClassName::State => STATE,
        ClassName::City => CITY,
        ClassName::Amenity => AMENITY,
        ClassName::Place => PLACE,
        ClassName::Review => REVIEW,
    }
}

pub fn find_attribute(class: ClassName, name: &str) -> Option<&'static Attribute> {
    attributes(class).iter().find(|attr| attr.name == name)
}

/// Coerce a value destined for `class.name`, leaving undeclared attributes alone.
pub fn coerce(class: ClassName, name: &str, value: Value) -> Value {
    match find_attribute(class, name) {
        Some(attr) => attr.attr_type.cast(value),
        None => value,
    }
}
