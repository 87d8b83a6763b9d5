//! Input format parsers.
//!
//! Each parser reads a schema format and produces an IR [`Schema`](crate::ir::Schema).

mod grammar;

pub use grammar::{ParseError, parse_grammar};
