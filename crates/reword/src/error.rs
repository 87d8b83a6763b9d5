//! Errors surfaced by the reword driver and CLI.

use reword_syntax::Diagnostic;
use reword_typegen::ParseError;
use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("compilation failed: {0}")]
    Compile(#[from] Diagnostic),

    #[error("invalid grammar {}: {source}", path.display())]
    Grammar { path: PathBuf, source: ParseError },

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("no reader or writer for language '{0}'")]
    UnknownLanguage(String),

    #[error("no backend named '{0}'")]
    UnknownBackend(String),

    #[error("cannot detect the language of {0}; pass --from")]
    UndetectedLanguage(String),

    #[error("tree does not match the typed AST: {0}")]
    Ast(String),
}

impl Error {
    /// The structured form of this error, for compile and IO failures.
    pub fn to_diagnostic(&self) -> Option<Diagnostic> {
        match self {
            Error::Compile(diagnostic) => Some(diagnostic.clone()),
            Error::Read { path, source } | Error::Write { path, source } => {
                Some(Diagnostic::io(path.display(), source))
            }
            _ => None,
        }
    }

    /// Multi-line rendering for the terminal, ending in a newline.
    pub fn render(&self) -> String {
        match self.to_diagnostic() {
            Some(diagnostic) => diagnostic.render(),
            None => format!("{self}\n"),
        }
    }
}
