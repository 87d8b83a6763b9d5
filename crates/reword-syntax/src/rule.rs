//! Bidirectional grammar rules.
//!
//! Every rule knows how to *lex* text into a [`Node`] and how to *generate*
//! text back from a node, and the two are defined side by side so the
//! printer stays the inverse of the parser.
//!
//! Rules live in a [`Grammar`] arena and refer to each other through
//! [`RuleId`]s. Recursive grammars are built in two phases: [`Grammar::declare`]
//! hands out the id of a forward slot, and [`Grammar::define`] wires the slot
//! once the rule it stands for exists.
//!
//! ```
//! use reword_syntax::rule::Grammar;
//! use reword_syntax::split::DelimiterSplitter;
//!
//! let mut g = Grammar::new();
//! let segment = g.scalar("segment");
//! let segments = g.list("segments", segment, DelimiterSplitter::new("."));
//! let body = g.suffix(segments, ";");
//! let import = g.prefix("import ", body);
//! let import = g.typed("import", import);
//!
//! let node = g.lex(import, "import java.util.List;").unwrap();
//! assert_eq!(node.find_list("segments").unwrap().len(), 3);
//! assert_eq!(g.generate(import, &node).unwrap(), "import java.util.List;");
//! ```

use crate::diagnostic::{Context, Diagnostic, DiagnosticKind};
use crate::node::Node;
use crate::outcome::Outcome;
use crate::split::Splitter;
use std::fmt;
use std::sync::Arc;

/// Index of a rule inside its [`Grammar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleId(usize);

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub enum Rule {
    /// The whole text, stored under `key`.
    Scalar { key: String },
    /// `literal` followed by whatever `inner` accepts.
    Prefix { literal: String, inner: RuleId },
    /// Whatever `inner` accepts followed by `literal`.
    Suffix { inner: RuleId, literal: String },
    /// `inner` on the text with surrounding whitespace removed.
    Strip { inner: RuleId },
    /// `inner`, on text that contains none of `forbidden`.
    Exclude { forbidden: String, inner: RuleId },
    /// `left`, then the first occurrence of `separator`, then `right`.
    Infix {
        left: RuleId,
        separator: String,
        right: RuleId,
    },
    /// Every segment produced by `splitter`, each through `element`.
    List {
        key: String,
        element: RuleId,
        splitter: Arc<dyn Splitter>,
    },
    /// The first alternative that succeeds.
    Or { rules: Vec<RuleId> },
    /// `inner`, with the resulting node stamped as `kind`.
    Type { kind: String, inner: RuleId },
    /// `inner`'s tree nested under `key`.
    Child { key: String, inner: RuleId },
    /// Forward slot for recursive grammars.
    Lazy { target: Option<RuleId> },
    /// Raw text kept verbatim under `key`.
    Placeholder { key: String },
    /// Only the empty string.
    Empty,
}

/// Arena of rules.
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    rules: Vec<Rule>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, rule: Rule) -> RuleId {
        self.rules.push(rule);
        RuleId(self.rules.len() - 1)
    }

    pub fn get(&self, id: RuleId) -> Option<&Rule> {
        self.rules.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn scalar(&mut self, key: impl Into<String>) -> RuleId {
        self.add(Rule::Scalar { key: key.into() })
    }

    pub fn prefix(&mut self, literal: impl Into<String>, inner: RuleId) -> RuleId {
        self.add(Rule::Prefix {
            literal: literal.into(),
            inner,
        })
    }

    pub fn suffix(&mut self, inner: RuleId, literal: impl Into<String>) -> RuleId {
        self.add(Rule::Suffix {
            inner,
            literal: literal.into(),
        })
    }

    pub fn strip(&mut self, inner: RuleId) -> RuleId {
        self.add(Rule::Strip { inner })
    }

    /// Reject text containing any character of `forbidden` before `inner` sees it.
    pub fn exclude(&mut self, forbidden: impl Into<String>, inner: RuleId) -> RuleId {
        self.add(Rule::Exclude {
            forbidden: forbidden.into(),
            inner,
        })
    }

    pub fn infix(&mut self, left: RuleId, separator: impl Into<String>, right: RuleId) -> RuleId {
        self.add(Rule::Infix {
            left,
            separator: separator.into(),
            right,
        })
    }

    pub fn list(
        &mut self,
        key: impl Into<String>,
        element: RuleId,
        splitter: impl Splitter + 'static,
    ) -> RuleId {
        self.add(Rule::List {
            key: key.into(),
            element,
            splitter: Arc::new(splitter),
        })
    }

    pub fn or(&mut self, rules: impl IntoIterator<Item = RuleId>) -> RuleId {
        self.add(Rule::Or {
            rules: rules.into_iter().collect(),
        })
    }

    pub fn typed(&mut self, kind: impl Into<String>, inner: RuleId) -> RuleId {
        self.add(Rule::Type {
            kind: kind.into(),
            inner,
        })
    }

    pub fn child(&mut self, key: impl Into<String>, inner: RuleId) -> RuleId {
        self.add(Rule::Child {
            key: key.into(),
            inner,
        })
    }

    pub fn placeholder(&mut self, key: impl Into<String>) -> RuleId {
        self.add(Rule::Placeholder { key: key.into() })
    }

    pub fn empty(&mut self) -> RuleId {
        self.add(Rule::Empty)
    }

    /// Reserve a forward slot to be wired later with [`Grammar::define`].
    pub fn declare(&mut self) -> RuleId {
        self.add(Rule::Lazy { target: None })
    }

    /// Wire a forward slot to the rule it stands for.
    pub fn define(&mut self, slot: RuleId, target: RuleId) -> Outcome<()> {
        if self.get(target).is_none() {
            return Err(Diagnostic::not_configured(
                format!("rule {target} does not exist"),
                Context::text(slot.to_string()),
            ));
        }
        match self.rules.get_mut(slot.0) {
            Some(Rule::Lazy { target: slot_target @ None }) => {
                *slot_target = Some(target);
                Ok(())
            }
            Some(Rule::Lazy { target: Some(_) }) => Err(Diagnostic::not_configured(
                format!("rule {slot} is already defined"),
                Context::text(slot.to_string()),
            )),
            _ => Err(Diagnostic::not_configured(
                format!("rule {slot} is not a forward declaration"),
                Context::text(slot.to_string()),
            )),
        }
    }

    fn rule(&self, id: RuleId, context: impl FnOnce() -> Context) -> Outcome<&Rule> {
        self.get(id).ok_or_else(|| {
            Diagnostic::not_configured(format!("rule {id} does not exist"), context())
        })
    }

    /// Parse `text` with rule `id`.
    pub fn lex(&self, id: RuleId, text: &str) -> Outcome<Node> {
        match self.rule(id, || Context::text(text))? {
            Rule::Scalar { key } => Ok(Node::new().with_string(key, text)),

            Rule::Prefix { literal, inner } => match text.strip_prefix(literal.as_str()) {
                Some(rest) => self.lex(*inner, rest),
                None => Err(Diagnostic::mismatch(
                    format!("prefix '{literal}' not present"),
                    Context::text(text),
                )),
            },

            Rule::Suffix { inner, literal } => match text.strip_suffix(literal.as_str()) {
                Some(rest) => self.lex(*inner, rest),
                None => Err(Diagnostic::mismatch(
                    format!("suffix '{literal}' not present"),
                    Context::text(text),
                )),
            },

            Rule::Strip { inner } => self.lex(*inner, text.trim()),

            Rule::Exclude { forbidden, inner } => {
                match text.chars().find(|c| forbidden.contains(*c)) {
                    Some(c) => Err(Diagnostic::mismatch(
                        format!("'{c}' not allowed"),
                        Context::text(text),
                    )),
                    None => self.lex(*inner, text),
                }
            }

            Rule::Infix {
                left,
                separator,
                right,
            } => {
                let Some((before, after)) = text.split_once(separator.as_str()) else {
                    return Err(Diagnostic::mismatch(
                        format!("infix '{separator}' not present"),
                        Context::text(text),
                    ));
                };
                let left = self.lex(*left, before)?;
                let right = self.lex(*right, after)?;
                Ok(left.merge(right))
            }

            Rule::List {
                key,
                element,
                splitter,
            } => {
                let children = splitter
                    .split(text)
                    .iter()
                    .map(|segment| self.lex(*element, segment))
                    .collect::<Outcome<Vec<_>>>()?;
                Ok(Node::new().with_list(key, children))
            }

            Rule::Or { rules } => rules
                .iter()
                .fold(Accumulator::new(), |acc, rule| {
                    acc.attempt(|| self.lex(*rule, text))
                })
                .into_outcome(|| Context::text(text)),

            Rule::Type { kind, inner } => self.lex(*inner, text).map(|node| node.retype(kind)),

            Rule::Child { key, inner } => self
                .lex(*inner, text)
                .map(|node| Node::new().with_node(key, node)),

            Rule::Lazy { target } => match target {
                Some(target) => self.lex(*target, text),
                None => Err(Diagnostic::not_configured(
                    format!("rule {id} is not configured"),
                    Context::text(text),
                )),
            },

            Rule::Placeholder { key } => Ok(Node::new().with_string(key, text)),

            Rule::Empty => {
                if text.is_empty() {
                    Ok(Node::new())
                } else {
                    Err(Diagnostic::mismatch("not empty", Context::text(text)))
                }
            }
        }
    }

    /// Render `node` with rule `id`.
    pub fn generate(&self, id: RuleId, node: &Node) -> Outcome<String> {
        match self.rule(id, || Context::tree(node))? {
            Rule::Scalar { key } => node.find_string(key).map(String::from).ok_or_else(|| {
                Diagnostic::missing_field(format!("key '{key}' not found"), Context::tree(node))
            }),

            Rule::Prefix { literal, inner } => self
                .generate(*inner, node)
                .map(|text| format!("{literal}{text}")),

            Rule::Suffix { inner, literal } => self
                .generate(*inner, node)
                .map(|text| format!("{text}{literal}")),

            Rule::Strip { inner } | Rule::Exclude { inner, .. } => self.generate(*inner, node),

            Rule::Infix {
                left,
                separator,
                right,
            } => {
                let left = self.generate(*left, node)?;
                let right = self.generate(*right, node)?;
                Ok(format!("{left}{separator}{right}"))
            }

            Rule::List {
                key,
                element,
                splitter,
            } => {
                let Some(children) = node.find_list(key) else {
                    return Err(Diagnostic::missing_field(
                        format!("key '{key}' not present"),
                        Context::tree(node),
                    ));
                };
                let parts = children
                    .iter()
                    .map(|child| self.generate(*element, child))
                    .collect::<Outcome<Vec<_>>>()?;
                Ok(parts.join(splitter.delimiter()))
            }

            Rule::Or { rules } => rules
                .iter()
                .fold(Accumulator::new(), |acc, rule| {
                    acc.attempt(|| self.generate(*rule, node))
                })
                .into_outcome(|| Context::tree(node)),

            Rule::Type { kind, inner } => {
                if node.is(kind) {
                    self.generate(*inner, node)
                } else {
                    Err(Diagnostic::mismatch(
                        format!("type '{kind}' not present"),
                        Context::tree(node),
                    ))
                }
            }

            Rule::Child { key, inner } => match node.find_node(key) {
                Some(child) => self.generate(*inner, child),
                None => Err(Diagnostic::missing_field(
                    format!("node '{key}' not present"),
                    Context::tree(node),
                )),
            },

            Rule::Lazy { target } => match target {
                Some(target) => self.generate(*target, node),
                None => Err(Diagnostic::not_configured(
                    format!("rule {id} is not configured"),
                    Context::tree(node),
                )),
            },

            Rule::Placeholder { key } => Ok(node.find_string(key).unwrap_or_default().to_string()),

            Rule::Empty => Ok(String::new()),
        }
    }
}

/// Fold state for alternation: the first success, or every failure so far.
#[derive(Debug)]
struct Accumulator<T> {
    value: Option<T>,
    errors: Vec<Diagnostic>,
}

impl<T> Accumulator<T> {
    fn new() -> Self {
        Self {
            value: None,
            errors: Vec::new(),
        }
    }

    /// Run `attempt` unless an earlier alternative already matched.
    fn attempt(mut self, attempt: impl FnOnce() -> Outcome<T>) -> Self {
        if self.value.is_some() {
            return self;
        }
        match attempt() {
            Ok(value) => self.value = Some(value),
            Err(error) => {
                tracing::trace!(%error, "alternative failed");
                self.errors.push(error);
            }
        }
        self
    }

    fn into_outcome(self, context: impl FnOnce() -> Context) -> Outcome<T> {
        match self.value {
            Some(value) => Ok(value),
            None => Err(Diagnostic::with_children(
                DiagnosticKind::AllAlternativesFailed,
                "no rule matched",
                context(),
                self.errors,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::{DelimiterSplitter, FoldingSplitter};

    #[test]
    fn test_scalar() {
        let mut g = Grammar::new();
        let name = g.scalar("name");
        let node = g.lex(name, "Foo").unwrap();
        assert_eq!(node.find_string("name"), Some("Foo"));
        assert_eq!(g.generate(name, &node).unwrap(), "Foo");

        let err = g.generate(name, &Node::new()).unwrap_err();
        assert_eq!(err.kind(), DiagnosticKind::MissingField);
        assert_eq!(err.message(), "key 'name' not found");
    }

    #[test]
    fn test_prefix_and_suffix() {
        let mut g = Grammar::new();
        let name = g.scalar("name");
        let suffix = g.suffix(name, ";");
        let rule = g.prefix("package ", suffix);

        let node = g.lex(rule, "package foo;").unwrap();
        assert_eq!(node.find_string("name"), Some("foo"));
        assert_eq!(g.generate(rule, &node).unwrap(), "package foo;");

        let err = g.lex(rule, "import foo;").unwrap_err();
        assert_eq!(err.kind(), DiagnosticKind::StructureMismatch);
        assert_eq!(err.to_string(), "prefix 'package ' not present: 'import foo;'");

        let err = g.lex(rule, "package foo").unwrap_err();
        assert_eq!(err.message(), "suffix ';' not present");
    }

    #[test]
    fn test_strip() {
        let mut g = Grammar::new();
        let name = g.scalar("name");
        let rule = g.strip(name);
        let node = g.lex(rule, "  Foo\n").unwrap();
        assert_eq!(node.find_string("name"), Some("Foo"));
        assert_eq!(g.generate(rule, &node).unwrap(), "Foo");
    }

    #[test]
    fn test_exclude() {
        let mut g = Grammar::new();
        let word = g.scalar("word");
        let rule = g.exclude("{};", word);
        let node = g.lex(rule, "public static").unwrap();
        assert_eq!(node.find_string("word"), Some("public static"));
        assert_eq!(g.generate(rule, &node).unwrap(), "public static");

        let err = g.lex(rule, "class B {").unwrap_err();
        assert_eq!(err.kind(), DiagnosticKind::StructureMismatch);
        assert_eq!(err.message(), "'{' not allowed");
    }

    #[test]
    fn test_infix_splits_at_first_separator() {
        let mut g = Grammar::new();
        let left = g.scalar("left");
        let right = g.scalar("right");
        let rule = g.infix(left, " = ", right);

        let node = g.lex(rule, "a = b = c").unwrap();
        assert_eq!(node.find_string("left"), Some("a"));
        assert_eq!(node.find_string("right"), Some("b = c"));
        assert_eq!(g.generate(rule, &node).unwrap(), "a = b = c");

        let err = g.lex(rule, "a").unwrap_err();
        assert_eq!(err.message(), "infix ' = ' not present");

        let err = g
            .generate(rule, &Node::new().with_string("left", "a"))
            .unwrap_err();
        assert_eq!(err.message(), "key 'right' not found");
    }

    #[test]
    fn test_list() {
        let mut g = Grammar::new();
        let segment = g.scalar("segment");
        let rule = g.list("segments", segment, DelimiterSplitter::new("."));

        let node = g.lex(rule, "a.b.C").unwrap();
        let segments = node.find_list("segments").unwrap();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[2].find_string("segment"), Some("C"));
        assert_eq!(g.generate(rule, &node).unwrap(), "a.b.C");

        let empty = g.lex(rule, "").unwrap();
        assert_eq!(empty.find_list("segments"), Some(&[][..]));
        assert_eq!(g.generate(rule, &empty).unwrap(), "");

        let err = g.generate(rule, &Node::new()).unwrap_err();
        assert_eq!(err.message(), "key 'segments' not present");
    }

    #[test]
    fn test_list_fails_on_first_bad_segment() {
        let mut g = Grammar::new();
        let name = g.scalar("name");
        let element = g.prefix("x", name);
        let rule = g.list("items", element, DelimiterSplitter::new(","));

        let err = g.lex(rule, "xa,b,c").unwrap_err();
        assert_eq!(err.to_string(), "prefix 'x' not present: 'b'");
    }

    #[test]
    fn test_or_returns_first_success() {
        let mut g = Grammar::new();
        let a = g.scalar("a");
        let first = g.prefix("x", a);
        let b = g.scalar("b");
        let second = g.typed("second", b);
        let rule = g.or([first, second]);

        let node = g.lex(rule, "xy").unwrap();
        assert_eq!(node.find_string("a"), Some("y"));
        assert!(node.find_string("b").is_none());

        let node = g.lex(rule, "zy").unwrap();
        assert!(node.is("second"));
        assert_eq!(g.generate(rule, &node).unwrap(), "zy");
    }

    #[test]
    fn test_or_reports_every_alternative() {
        let mut g = Grammar::new();
        let name = g.scalar("name");
        let a = g.prefix("a", name);
        let b = g.prefix("b", name);
        let c = g.suffix(name, "c");
        let rule = g.or([a, b, c]);

        let err = g.lex(rule, "zzz").unwrap_err();
        assert_eq!(err.kind(), DiagnosticKind::AllAlternativesFailed);
        assert_eq!(err.message(), "no rule matched");
        let messages: Vec<&str> = err.children().iter().map(Diagnostic::message).collect();
        assert_eq!(
            messages,
            vec!["prefix 'a' not present", "prefix 'b' not present", "suffix 'c' not present"]
        );
    }

    #[test]
    fn test_type_guards_generate() {
        let mut g = Grammar::new();
        let name = g.scalar("name");
        let rule = g.typed("class", name);

        let node = g.lex(rule, "Foo").unwrap();
        assert!(node.is("class"));
        assert_eq!(g.generate(rule, &node).unwrap(), "Foo");

        let err = g.generate(rule, &node.retype("object")).unwrap_err();
        assert_eq!(err.kind(), DiagnosticKind::StructureMismatch);
        assert_eq!(err.message(), "type 'class' not present");
    }

    #[test]
    fn test_child_nests_tree() {
        let mut g = Grammar::new();
        let type_name = g.scalar("name");
        let type_rule = g.typed("type", type_name);
        let nested = g.child("type", type_rule);
        let name = g.scalar("name");
        let rule = g.infix(nested, " ", name);

        let node = g.lex(rule, "int x").unwrap();
        assert_eq!(node.find_string("name"), Some("x"));
        let ty = node.find_node("type").unwrap();
        assert!(ty.is("type"));
        assert_eq!(ty.find_string("name"), Some("int"));
        assert_eq!(g.generate(rule, &node).unwrap(), "int x");
    }

    #[test]
    fn test_lazy_recursion() {
        // item := "(" items ")" | name, items separated by folding statements
        let mut g = Grammar::new();
        let item = g.declare();
        let name = g.scalar("name");
        let leaf = g.suffix(name, ";");
        let leaf = g.typed("leaf", leaf);
        let children = g.list("children", item, FoldingSplitter::statements());
        let block = g.suffix(children, "}");
        let block = g.prefix("{", block);
        let block = g.typed("block", block);
        let alternatives = g.or([block, leaf]);
        g.define(item, alternatives).unwrap();

        let text = "{a;{b;}}";
        let node = g.lex(item, text).unwrap();
        assert!(node.is("block"));
        let children = node.find_list("children").unwrap();
        assert_eq!(children.len(), 2);
        assert!(children[1].is("block"));
        assert_eq!(g.generate(item, &node).unwrap(), text);
    }

    #[test]
    fn test_unwired_lazy_rule() {
        let mut g = Grammar::new();
        let slot = g.declare();
        let err = g.lex(slot, "x").unwrap_err();
        assert_eq!(err.kind(), DiagnosticKind::RuleNotConfigured);
        let err = g.generate(slot, &Node::new()).unwrap_err();
        assert_eq!(err.kind(), DiagnosticKind::RuleNotConfigured);
    }

    #[test]
    fn test_define_twice_or_on_non_lazy() {
        let mut g = Grammar::new();
        let slot = g.declare();
        let name = g.scalar("name");
        g.define(slot, name).unwrap();
        let err = g.define(slot, name).unwrap_err();
        assert_eq!(err.message(), format!("rule {slot} is already defined"));
        let err = g.define(name, slot).unwrap_err();
        assert_eq!(err.kind(), DiagnosticKind::RuleNotConfigured);
    }

    #[test]
    fn test_placeholder_keeps_text() {
        let mut g = Grammar::new();
        let rule = g.placeholder("content");
        let node = g.lex(rule, "anything { at all").unwrap();
        assert_eq!(g.generate(rule, &node).unwrap(), "anything { at all");
        assert_eq!(g.generate(rule, &Node::new()).unwrap(), "");
    }

    #[test]
    fn test_empty() {
        let mut g = Grammar::new();
        let empty = g.empty();
        let rule = g.strip(empty);
        assert!(g.lex(rule, " \n\t").unwrap().is_empty());
        assert_eq!(g.lex(rule, " x ").unwrap_err().message(), "not empty");
        assert_eq!(g.generate(rule, &Node::new()).unwrap(), "");
    }

    #[test]
    fn test_unknown_rule_id() {
        let g = Grammar::new();
        let err = g.lex(RuleId(3), "x").unwrap_err();
        assert_eq!(err.kind(), DiagnosticKind::RuleNotConfigured);
    }
}
