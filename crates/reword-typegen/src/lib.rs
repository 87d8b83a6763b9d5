//! Typed tree node generation from a grammar DSL.
//!
//! `reword-typegen` reads a line-oriented grammar description and emits
//! strongly-typed node definitions that convert to and from the generic
//! [`reword_syntax::Node`] tree.
//!
//! # Architecture
//!
//! ```text
//! Input Format           IR              Output Backends
//! ────────────       ─────────────     ─────────────────
//! Grammar DSL   ───> Schema ─────────> Rust types + (de)serializers
//!                    (ir.rs)
//! ```
//!
//! # Example
//!
//! ```
//! use reword_typegen::{input, output};
//!
//! let grammar = "
//!     Type = name
//!     Declaration = Type type, name
//!     Record = name, [Declaration params]
//! ";
//!
//! // Parse the DSL to IR
//! let schema = input::parse_grammar(grammar).unwrap();
//!
//! // Generate Rust
//! let rust = output::generate_rust(&schema, &Default::default());
//! assert!(rust.contains("pub struct Record"));
//! assert!(rust.contains("pub r#type: ::std::boxed::Box<Type>,"));
//! ```
//!
//! The same schema can check a tree at runtime:
//!
//! ```
//! use reword_syntax::{DiagnosticKind, Node};
//! use reword_typegen::input::parse_grammar;
//!
//! let schema = parse_grammar("Record = name, [Record params]").unwrap();
//! let tree = Node::of_kind("record").with_string("name", "Point");
//! let err = schema.validate("Record", &tree).unwrap_err();
//! assert_eq!(err.kind(), DiagnosticKind::MissingField);
//! ```
//!
//! # Feature Flags
//!
//! - `backend-rust` - Rust structs and enums (default)

pub mod input;
pub mod ir;
pub mod output;
pub mod registry;
pub mod traits;

// Re-export commonly used items
pub use input::{ParseError, parse_grammar};
pub use ir::{Field, FieldType, Schema, Shape, TypeDef};

// Re-export traits
pub use traits::Backend;

// Re-export registry functions
pub use registry::{backend_names, backends, get_backend, register_backend};

// Re-export generators
#[cfg(feature = "backend-rust")]
pub use output::{RustBackend, RustOptions, generate_rust};
