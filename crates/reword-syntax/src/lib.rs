//! Bidirectional, rule-based syntax translation.
//!
//! `reword-syntax` describes a language as a [`Grammar`] of small rules.
//! The same rule lexes text into a generic [`Node`] tree and generates text
//! back from one, so a reader for one language and a writer for another can
//! meet on a shared tree shape.
//!
//! # Architecture
//!
//! ```text
//! Source text        Tree            Target text
//! ───────────    ─────────────    ─────────────
//! Java       ─┐                ┌─> Tuff
//!             ├─> Node ────────┤
//! (future)   ─┘   (node.rs)    └─> (future)
//! ```
//!
//! Failures are [`Diagnostic`] trees: an alternation that fails reports every
//! branch it tried, each with the text or tree it was looking at.
//!
//! # Example
//!
//! ```ignore
//! use reword_syntax::{read_java, write_tuff};
//!
//! let tree = read_java("class Foo {}")?;
//! // Writing needs the tree rewritten into Tuff's shape first.
//! ```

pub mod diagnostic;
pub mod node;
pub mod outcome;
pub mod registry;
pub mod rule;
pub mod split;
pub mod traits;

pub mod input;
pub mod output;

// Re-exports: core types
pub use diagnostic::{Context, Diagnostic, DiagnosticKind};
pub use node::Node;
pub use outcome::{Outcome, OutcomeExt};
pub use rule::{Grammar, Rule, RuleId};
pub use split::{Cursor, DelimiterSplitter, Folder, FoldingSplitter, Splitter, StatementFolder};

// Re-exports: Traits
pub use traits::{Reader, Writer};

// Re-exports: Registry
pub use registry::{
    reader_for_extension, reader_for_language, readers, register_reader, register_writer,
    writer_for_language, writers,
};

// Re-exports: Built-in readers
#[cfg(feature = "read-java")]
pub use input::{JavaReader, read_java};

// Re-exports: Built-in writers
#[cfg(feature = "write-tuff")]
pub use output::{TuffWriter, write_tuff};
