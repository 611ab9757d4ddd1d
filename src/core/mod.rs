pub mod error;
pub mod value;

pub use error::{HbnbError, Result};
pub use value::Value;
