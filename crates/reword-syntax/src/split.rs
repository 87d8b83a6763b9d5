//! Segmenting text into statement-level chunks.
//!
//! A [`Splitter`] cuts text into segments for a list rule and names the
//! delimiter used to join generated segments back together. Splitting empty
//! text yields no segments, so an empty list round-trips through `""`.
//!
//! [`FoldingSplitter`] walks the text one character at a time through a
//! [`Folder`], which decides where segments end. [`StatementFolder`] closes
//! segments on top-level `;` and on the `}` that closes an outermost block,
//! and never looks inside string or character literals.

use std::fmt;
use std::str::Chars;

pub trait Splitter: Send + Sync + fmt::Debug {
    fn split(&self, input: &str) -> Vec<String>;

    /// Text placed between generated segments.
    fn delimiter(&self) -> &str;
}

/// Splits on every occurrence of a fixed literal.
#[derive(Debug, Clone)]
pub struct DelimiterSplitter {
    delimiter: String,
}

impl DelimiterSplitter {
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
        }
    }
}

impl Splitter for DelimiterSplitter {
    fn split(&self, input: &str) -> Vec<String> {
        if input.is_empty() {
            return Vec::new();
        }
        input.split(self.delimiter.as_str()).map(String::from).collect()
    }

    fn delimiter(&self) -> &str {
        &self.delimiter
    }
}

/// Scan state threaded through a [`Folder`].
pub struct Cursor<'a> {
    input: Chars<'a>,
    buffer: String,
    depth: usize,
    segments: Vec<String>,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input: input.chars(),
            buffer: String::new(),
            depth: 0,
            segments: Vec::new(),
        }
    }

    /// Take the next character without recording it.
    pub fn pop(&mut self) -> Option<char> {
        self.input.next()
    }

    pub fn append(&mut self, c: char) {
        self.buffer.push(c);
    }

    /// Take the next character and record it in the current segment.
    pub fn pop_and_append(&mut self) -> Option<char> {
        let c = self.pop()?;
        self.append(c);
        Some(c)
    }

    /// Close the current segment.
    pub fn advance(&mut self) {
        self.segments.push(std::mem::take(&mut self.buffer));
    }

    pub fn enter(&mut self) {
        self.depth += 1;
    }

    pub fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// At top level, outside every block.
    pub fn is_level(&self) -> bool {
        self.depth == 0
    }

    /// Inside exactly one block.
    pub fn is_shallow(&self) -> bool {
        self.depth == 1
    }

    fn finish(mut self) -> Vec<String> {
        if !self.buffer.is_empty() {
            self.advance();
        }
        self.segments
    }
}

/// Decides, character by character, where segments end.
pub trait Folder: Send + Sync + fmt::Debug {
    fn fold(&self, cursor: &mut Cursor<'_>, c: char);
}

/// Splits by running a [`Folder`] over every character.
#[derive(Debug, Clone)]
pub struct FoldingSplitter<F> {
    folder: F,
}

impl<F: Folder> FoldingSplitter<F> {
    pub fn new(folder: F) -> Self {
        Self { folder }
    }
}

impl FoldingSplitter<StatementFolder> {
    pub fn statements() -> Self {
        Self::new(StatementFolder)
    }
}

impl<F: Folder> Splitter for FoldingSplitter<F> {
    fn split(&self, input: &str) -> Vec<String> {
        let mut cursor = Cursor::new(input);
        while let Some(c) = cursor.pop() {
            self.folder.fold(&mut cursor, c);
        }
        cursor.finish()
    }

    fn delimiter(&self) -> &str {
        ""
    }
}

/// Statement and block boundaries for brace-delimited languages.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatementFolder;

impl StatementFolder {
    /// After an opening `'`: one character, or a backslash and the
    /// character it escapes, then the closing quote.
    fn fold_char_literal(cursor: &mut Cursor<'_>) {
        let Some(first) = cursor.pop_and_append() else {
            return;
        };
        if first == '\\' {
            cursor.pop_and_append();
        }
        cursor.pop_and_append();
    }

    /// After an opening `"`: everything up to the first unescaped `"`.
    fn fold_string_literal(cursor: &mut Cursor<'_>) {
        while let Some(next) = cursor.pop_and_append() {
            if next == '\\' {
                cursor.pop_and_append();
            } else if next == '"' {
                break;
            }
        }
    }
}

impl Folder for StatementFolder {
    fn fold(&self, cursor: &mut Cursor<'_>, c: char) {
        cursor.append(c);
        match c {
            '\'' => Self::fold_char_literal(cursor),
            '"' => Self::fold_string_literal(cursor),
            ';' if cursor.is_level() => cursor.advance(),
            '}' if cursor.is_shallow() => {
                cursor.exit();
                cursor.advance();
            }
            '{' => cursor.enter(),
            '}' => cursor.exit(),
            _ => {}
        }
    }
}
