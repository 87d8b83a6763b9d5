//! Traits for code generation backends.

use crate::ir::Schema;

/// A code generation backend.
///
/// Backends transform an IR [`Schema`] into source code for a target language.
///
/// # Implementing Custom Backends
///
/// ```ignore
/// use reword_typegen::{Backend, ir::Schema, register_backend};
///
/// struct MyBackend;
///
/// impl Backend for MyBackend {
///     fn name(&self) -> &'static str { "my-backend" }
///     fn language(&self) -> &'static str { "kotlin" }
///     fn extension(&self) -> &'static str { "kt" }
///     fn generate(&self, schema: &Schema) -> String { /* ... */ }
/// }
///
/// // Register before first use
/// register_backend(&MyBackend);
/// ```
pub trait Backend: Send + Sync {
    /// Unique backend identifier (e.g., "rust").
    fn name(&self) -> &'static str;

    /// Target language (e.g., "rust").
    fn language(&self) -> &'static str;

    /// File extension for generated code (e.g., "rs").
    fn extension(&self) -> &'static str;

    /// Generate code from the IR schema.
    fn generate(&self, schema: &Schema) -> String;
}
