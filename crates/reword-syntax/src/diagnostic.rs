//! Structured, nested failure descriptions.
//!
//! A [`Diagnostic`] is a tree: each failure carries the slice of text or the
//! tree it was looking at, plus the failures that caused it. Children are
//! kept sorted by subtree depth, shallowest first, so the most specific
//! failures are listed before broad ones.

use crate::node::Node;
use serde::Serialize;
use std::fmt::{self, Write};

/// What kind of failure a diagnostic describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// An expected literal, affix, separator or discriminant is absent.
    StructureMismatch,
    /// A required field is absent from a tree.
    MissingField,
    /// Every branch of an alternation failed.
    AllAlternativesFailed,
    /// A forward-declared rule was used before it was wired.
    RuleNotConfigured,
    /// Reading or writing outside the core failed.
    Io,
}

/// What a diagnostic was looking at when it failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Context {
    Tree(Node),
    Text(String),
}

impl Context {
    pub fn text(text: impl Into<String>) -> Self {
        Context::Text(text.into())
    }

    pub fn tree(node: &Node) -> Self {
        Context::Tree(node.clone())
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Context::Tree(node) => write!(f, "{node}"),
            Context::Text(text) => write!(f, "{}", text.escape_debug()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("{message}: '{context}'")]
pub struct Diagnostic {
    kind: DiagnosticKind,
    message: String,
    context: Context,
    children: Vec<Diagnostic>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>, context: Context) -> Self {
        Self {
            kind,
            message: message.into(),
            context,
            children: Vec::new(),
        }
    }

    /// Build a diagnostic with causes, sorted by ascending depth.
    pub fn with_children(
        kind: DiagnosticKind,
        message: impl Into<String>,
        context: Context,
        mut children: Vec<Diagnostic>,
    ) -> Self {
        children.sort_by_key(Diagnostic::depth);
        Self {
            kind,
            message: message.into(),
            context,
            children,
        }
    }

    pub fn mismatch(message: impl Into<String>, context: Context) -> Self {
        Self::new(DiagnosticKind::StructureMismatch, message, context)
    }

    pub fn missing_field(message: impl Into<String>, context: Context) -> Self {
        Self::new(DiagnosticKind::MissingField, message, context)
    }

    pub fn not_configured(message: impl Into<String>, context: Context) -> Self {
        Self::new(DiagnosticKind::RuleNotConfigured, message, context)
    }

    /// Wrap an IO failure so it renders like every other diagnostic.
    pub fn io(path: impl fmt::Display, error: &std::io::Error) -> Self {
        Self::new(
            DiagnosticKind::Io,
            error.to_string(),
            Context::text(path.to_string()),
        )
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn children(&self) -> &[Diagnostic] {
        &self.children
    }

    /// Zero for a leaf, otherwise one more than the deepest child.
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Render the whole tree, one failure per line, causes indented.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, indent: usize) {
        for _ in 0..indent {
            out.push_str("  ");
        }
        let _ = writeln!(out, "{self}");
        for child in &self.children {
            child.render_into(out, indent + 1);
        }
    }
}
