//! Line-oriented command interpreter.
//!
//! A line goes through three steps:
//!
//! - `dotted.rs` - rewrites `Class.method(args)` into command words
//! - `parser.rs` - turns words into a [`Command`]
//! - `interpreter.rs` - validates and runs the command against a store

pub mod command;
pub mod dotted;
pub mod help;
pub mod interpreter;
pub mod mapping;
pub mod parser;
pub mod tokenizer;

pub use command::{Command, Target, UpdateArgs};
pub use interpreter::{Console, Control};
pub use parser::parse;
