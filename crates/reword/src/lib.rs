//! Java to Tuff translation driver.
//!
//! Ties the reword-syntax reader and writer together with the import
//! hoisting pass:
//!
//! ```text
//! Java source --read_java--> Node --hoist--> Node --write_tuff--> Tuff source
//! ```
//!
//! ```
//! use reword::Pipeline;
//!
//! let pipeline = Pipeline::for_languages("java", "tuff").unwrap();
//! let compilation = pipeline.run("import a.b.C;\nclass Foo {}").unwrap();
//! assert_eq!(compilation.output, "extern let { C } = a::b;\nout object Foo {}\n");
//! ```

#[allow(clippy::large_enum_variant)]
pub mod ast;
pub mod commands;
pub mod config;
pub mod error;
pub mod outline;
pub mod pipeline;
pub mod transform;

pub use config::RewordConfig;
pub use error::Error;
pub use outline::{Entry, outline_source};
pub use pipeline::{Compilation, Pipeline};
pub use transform::{ImportRegistry, Namespace, Transformed, hoist};
