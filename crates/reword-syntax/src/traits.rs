//! Traits for language readers and writers.

use crate::node::Node;
use crate::outcome::Outcome;

/// A reader lexes source text into a tree.
pub trait Reader: Send + Sync {
    /// Language identifier (e.g., "java").
    fn language(&self) -> &'static str;

    /// File extensions this reader handles (e.g., &["java"]).
    fn extensions(&self) -> &'static [&'static str];

    /// Lex source text into a tree.
    fn read(&self, source: &str) -> Outcome<Node>;
}

/// A writer generates target text from a tree.
pub trait Writer: Send + Sync {
    /// Language identifier (e.g., "tuff").
    fn language(&self) -> &'static str;

    /// File extension for output (e.g., "tuff").
    fn extension(&self) -> &'static str;

    /// Generate text from a tree.
    fn write(&self, tree: &Node) -> Outcome<String>;
}
