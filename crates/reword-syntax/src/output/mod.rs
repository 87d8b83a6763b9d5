//! Output writers - generate target text from trees.

#[cfg(feature = "write-tuff")]
pub mod tuff;

#[cfg(feature = "write-tuff")]
pub use tuff::{TUFF_WRITER, TuffGrammar, TuffWriter, tuff_grammar, write_tuff};
