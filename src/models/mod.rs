pub mod class_name;
pub mod record;
pub mod schema;

pub use class_name::ClassName;
pub use record::{Record, storage_key};
pub use schema::{Attribute, AttributeType};
