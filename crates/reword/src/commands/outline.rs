//! Outline command - list the types declared in a Java file.

use crate::error::Error;
use clap::Args;
use std::path::PathBuf;

/// Outline command arguments
#[derive(Debug, Args)]
pub struct OutlineArgs {
    /// Java source file, use - for stdin
    pub input: PathBuf,

    /// Print entries as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the outline command
pub fn run(args: OutlineArgs) -> Result<(), Error> {
    let content = super::read_input(&args.input)?;
    let entries = crate::outline::outline_source(&content)?;

    if args.json {
        let json = serde_json::to_string_pretty(&entries).map_err(|e| Error::Ast(e.to_string()))?;
        println!("{json}");
    } else {
        for entry in &entries {
            println!("{entry}");
        }
    }
    Ok(())
}
