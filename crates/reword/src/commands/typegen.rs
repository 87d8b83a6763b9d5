//! Typegen command - generate typed AST code from a grammar file.

use crate::config::RewordConfig;
use crate::error::Error;
use clap::Args;
use reword_typegen::{RustOptions, Schema, generate_rust, get_backend, parse_grammar};
use std::path::PathBuf;

/// Typegen command arguments
#[derive(Debug, Args)]
pub struct TypegenArgs {
    /// Grammar file, use - for stdin
    pub grammar: PathBuf,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Backend to generate with (default: rust)
    #[arg(short, long)]
    pub backend: Option<String>,

    /// Path of the tree type used by the rust backend
    #[arg(long)]
    pub node_path: Option<String>,
}

/// Generate code for `schema` with the named backend.
///
/// The rust backend honours the configured node path and derives; other
/// registered backends run with their own defaults.
pub fn generate(schema: &Schema, backend: &str, options: RustOptions) -> Result<String, Error> {
    if backend == "rust" {
        return Ok(generate_rust(schema, &options));
    }
    let backend = get_backend(backend).ok_or_else(|| Error::UnknownBackend(backend.to_string()))?;
    Ok(backend.generate(schema))
}

/// Run the typegen command
pub fn run(args: TypegenArgs, config: &RewordConfig) -> Result<(), Error> {
    let content = super::read_input(&args.grammar)?;
    let schema = parse_grammar(&content).map_err(|source| Error::Grammar {
        path: args.grammar.clone(),
        source,
    })?;

    let defaults = RustOptions::default();
    let options = RustOptions {
        node_path: args
            .node_path
            .or_else(|| config.typegen.node_path.clone())
            .unwrap_or(defaults.node_path),
        derives: config.typegen.derives.clone().unwrap_or(defaults.derives),
    };
    let backend = args
        .backend
        .or_else(|| config.typegen.backend.clone())
        .unwrap_or_else(|| "rust".to_string());

    tracing::debug!(backend = %backend, types = schema.definitions.len(), "generating types");
    let code = generate(&schema, &backend, options)?;

    match args.output {
        Some(path) => {
            super::write_output(&path, &code)?;
            eprintln!(
                "Generated {} -> {} ({})",
                args.grammar.display(),
                path.display(),
                backend
            );
        }
        None => print!("{code}"),
    }
    Ok(())
}
