//! Input readers - lex source text into trees.

#[cfg(feature = "read-java")]
pub mod java;

#[cfg(feature = "read-java")]
pub use java::{JAVA_READER, JavaGrammar, JavaReader, java_grammar, read_java};
