//! Typed nodes for trees produced by the Java reader.
//!
//! Generated at build time from `grammar/java.grammar`. Every type converts
//! to and from the generic tree with `deserialize`/`serialize`.

include!(concat!(env!("OUT_DIR"), "/java_ast.rs"));

/// The grammar the types above were generated from.
pub const GRAMMAR: &str = include_str!("../grammar/java.grammar");
