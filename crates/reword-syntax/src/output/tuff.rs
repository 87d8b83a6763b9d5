//! Rule-based Tuff writer.
//!
//! Renders `extern let` bindings and `out object` declarations. Members
//! with no Tuff counterpart are accepted only as `placeholder` nodes, whose
//! content is emitted verbatim.

use crate::node::Node;
use crate::outcome::Outcome;
use crate::rule::{Grammar, RuleId};
use crate::split::{DelimiterSplitter, FoldingSplitter};
use crate::traits::Writer;
use std::sync::OnceLock;

/// Static instance of the Tuff writer for registry.
pub static TUFF_WRITER: TuffWriter = TuffWriter;

/// Tuff writer backed by [`tuff_grammar`].
pub struct TuffWriter;

impl Writer for TuffWriter {
    fn language(&self) -> &'static str {
        "tuff"
    }

    fn extension(&self) -> &'static str {
        "tuff"
    }

    fn write(&self, tree: &Node) -> Outcome<String> {
        write_tuff(tree)
    }
}

/// Render a `root` node as Tuff source, one top-level member per line.
pub fn write_tuff(tree: &Node) -> Outcome<String> {
    let tuff = tuff_grammar()?;
    tuff.grammar.generate(tuff.root, tree)
}

/// The Tuff rule set and its entry points.
#[derive(Debug)]
pub struct TuffGrammar {
    pub grammar: Grammar,
    pub root: RuleId,
    pub member: RuleId,
}

/// The shared Tuff grammar, built on first use.
pub fn tuff_grammar() -> Outcome<&'static TuffGrammar> {
    static GRAMMAR: OnceLock<Outcome<TuffGrammar>> = OnceLock::new();
    GRAMMAR.get_or_init(build).as_ref().map_err(Clone::clone)
}

fn build() -> Outcome<TuffGrammar> {
    let mut g = Grammar::new();

    let member = g.declare();
    let extern_let = extern_let(&mut g);
    let object = object(&mut g, member);
    let content = g.placeholder("content");
    let placeholder = g.typed("placeholder", content);
    let members = g.or([extern_let, object, placeholder]);
    g.define(member, members)?;

    let line = g.suffix(member, "\n");
    let children = g.list("children", line, FoldingSplitter::statements());
    let root = g.typed("root", children);

    Ok(TuffGrammar {
        grammar: g,
        root,
        member,
    })
}

/// `extern let { A, B } = a::b;`
fn extern_let(g: &mut Grammar) -> RuleId {
    let child = g.scalar("child");
    let children = g.list("children", child, DelimiterSplitter::new(", "));
    let segment = g.scalar("segment");
    let namespace = g.list("namespace", segment, DelimiterSplitter::new("::"));
    let namespace = g.suffix(namespace, ";");
    let binding = g.infix(children, " } = ", namespace);
    let binding = g.prefix("extern let { ", binding);
    g.typed("extern let", binding)
}

/// `out object Name {<members>}`
fn object(g: &mut Grammar, member: RuleId) -> RuleId {
    let name = g.scalar("name");
    let body = g.list("body", member, FoldingSplitter::statements());
    let body = g.suffix(body, "}");
    let declaration = g.infix(name, " {", body);
    let declaration = g.prefix("out object ", declaration);
    g.typed("object", declaration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticKind;

    fn leaf(key: &str, value: &str) -> Node {
        Node::new().with_string(key, value)
    }

    fn extern_let_node(children: &[&str], namespace: &[&str]) -> Node {
        Node::of_kind("extern let")
            .with_list("children", children.iter().map(|c| leaf("child", c)).collect())
            .with_list("namespace", namespace.iter().map(|s| leaf("segment", s)).collect())
    }

    fn object_node(name: &str, body: Vec<Node>) -> Node {
        Node::of_kind("object")
            .with_string("name", name)
            .with_list("body", body)
    }

    fn root(children: Vec<Node>) -> Node {
        Node::of_kind("root").with_list("children", children)
    }

    #[test]
    fn test_extern_let_and_object() {
        let tree = root(vec![
            extern_let_node(&["C", "D"], &["a", "b"]),
            object_node("Foo", vec![]),
        ]);
        assert_eq!(
            write_tuff(&tree).unwrap(),
            "extern let { C, D } = a::b;\nout object Foo {}\n"
        );
    }

    #[test]
    fn test_nested_objects_and_placeholders() {
        let inner = object_node("Inner", vec![]);
        let field = Node::of_kind("placeholder").with_string("content", "int x;");
        let tree = root(vec![object_node("Outer", vec![field, inner])]);
        assert_eq!(
            write_tuff(&tree).unwrap(),
            "out object Outer {int x;out object Inner {}}\n"
        );
    }

    #[test]
    fn test_empty_root() {
        assert_eq!(write_tuff(&root(vec![])).unwrap(), "");
    }

    #[test]
    fn test_object_lexes_back() {
        let tuff = tuff_grammar().unwrap();
        let tree = root(vec![object_node("Foo", vec![])]);
        let text = tuff.grammar.generate(tuff.root, &tree).unwrap();
        let node = tuff.grammar.lex(tuff.member, text.trim_end()).unwrap();
        assert!(node.is("object"));
        assert_eq!(node.find_string("name"), Some("Foo"));
    }

    #[test]
    fn test_class_node_is_rejected() {
        let class = Node::of_kind("class")
            .with_string("name", "Foo")
            .with_list("body", vec![]);
        let err = write_tuff(&root(vec![class])).unwrap_err();
        assert_eq!(err.kind(), DiagnosticKind::AllAlternativesFailed);
        assert_eq!(err.children().len(), 3);
        assert!(
            err.children()
                .iter()
                .all(|c| c.kind() == DiagnosticKind::StructureMismatch)
        );
    }

    #[test]
    fn test_missing_name_reports_field() {
        let tree = root(vec![Node::of_kind("object").with_list("body", vec![])]);
        let err = write_tuff(&tree).unwrap_err();
        assert!(err.children().iter().any(|c| {
            c.kind() == DiagnosticKind::MissingField && c.message() == "key 'name' not found"
        }));
    }
}
