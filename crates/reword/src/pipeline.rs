//! One compilation run: read, hoist, write.

use crate::error::Error;
use crate::transform::{ImportRegistry, Transformed, hoist};
use reword_syntax::{Node, Outcome, Reader, Writer, reader_for_language, writer_for_language};

/// The result of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct Compilation {
    /// Target-language source text.
    pub output: String,
    /// The rewritten tree the output was generated from.
    pub tree: Node,
    pub imports: ImportRegistry,
}

/// A source reader and a target writer joined by the hoisting pass.
pub struct Pipeline<'a> {
    reader: &'a dyn Reader,
    writer: &'a dyn Writer,
}

impl<'a> Pipeline<'a> {
    pub fn new(reader: &'a dyn Reader, writer: &'a dyn Writer) -> Self {
        Self { reader, writer }
    }

    /// Source and target language.
    pub fn languages(&self) -> (&'static str, &'static str) {
        (self.reader.language(), self.writer.language())
    }

    /// Lex `source` and rewrite it into target shape.
    pub fn lower(&self, source: &str) -> Outcome<Transformed> {
        tracing::debug!(language = self.reader.language(), bytes = source.len(), "lexing");
        let tree = self.reader.read(source)?;
        tracing::debug!("hoisting imports");
        Ok(hoist(tree))
    }

    /// Run every phase. Nothing is produced unless all of them succeed.
    pub fn run(&self, source: &str) -> Outcome<Compilation> {
        let Transformed { tree, imports } = self.lower(source)?;
        tracing::debug!(language = self.writer.language(), "generating");
        let output = self.writer.write(&tree)?;
        Ok(Compilation {
            output,
            tree,
            imports,
        })
    }
}

impl Pipeline<'static> {
    /// Look both ends up in the registries.
    pub fn for_languages(from: &str, to: &str) -> Result<Self, Error> {
        let reader =
            reader_for_language(from).ok_or_else(|| Error::UnknownLanguage(from.to_string()))?;
        let writer = writer_for_language(to).ok_or_else(|| Error::UnknownLanguage(to.to_string()))?;
        Ok(Self::new(reader, writer))
    }
}
