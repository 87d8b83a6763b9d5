//! Rule-based Java reader.
//!
//! Covers the declaration skeleton of a compilation unit: `package` and
//! `import` statements, and classes, interfaces and records nested to any
//! depth. Record components are lexed into `declaration` nodes. Any other
//! class-body member is kept verbatim as a `placeholder` node.
//!
//! Node kinds produced: `root`, `whitespace`, `package`, `import`,
//! `segment`, `class`, `interface`, `record`, `declaration`, `type`,
//! `placeholder`.

use crate::node::Node;
use crate::outcome::Outcome;
use crate::rule::{Grammar, RuleId};
use crate::split::{DelimiterSplitter, FoldingSplitter};
use crate::traits::Reader;
use std::sync::OnceLock;

/// Static instance of the Java reader for registry.
pub static JAVA_READER: JavaReader = JavaReader;

/// Java reader backed by [`java_grammar`].
pub struct JavaReader;

impl Reader for JavaReader {
    fn language(&self) -> &'static str {
        "java"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["java"]
    }

    fn read(&self, source: &str) -> Outcome<Node> {
        read_java(source)
    }
}

/// Lex a Java compilation unit into a `root` node.
pub fn read_java(source: &str) -> Outcome<Node> {
    let java = java_grammar()?;
    java.grammar.lex(java.root, source)
}

/// The Java rule set and its entry points.
#[derive(Debug)]
pub struct JavaGrammar {
    pub grammar: Grammar,
    /// A whole compilation unit.
    pub root: RuleId,
    /// One class-body member.
    pub member: RuleId,
}

/// The shared Java grammar, built on first use.
pub fn java_grammar() -> Outcome<&'static JavaGrammar> {
    static GRAMMAR: OnceLock<Outcome<JavaGrammar>> = OnceLock::new();
    GRAMMAR.get_or_init(build).as_ref().map_err(Clone::clone)
}

fn build() -> Outcome<JavaGrammar> {
    let mut g = Grammar::new();

    let member = g.declare();
    let interface = structure(&mut g, "interface", member);
    let record = record(&mut g, member);
    let class = structure(&mut g, "class", member);
    let content = g.placeholder("content");
    let placeholder = g.typed("placeholder", content);
    let members = g.or([interface, record, class, placeholder]);
    g.define(member, members)?;

    let whitespace = whitespace(&mut g);
    let package = namespaced(&mut g, "package");
    let import = namespaced(&mut g, "import");
    let root_member = g.or([whitespace, package, import, class]);
    let children = g.list("children", root_member, FoldingSplitter::statements());
    let root = g.typed("root", children);

    Ok(JavaGrammar {
        grammar: g,
        root,
        member,
    })
}

fn whitespace(g: &mut Grammar) -> RuleId {
    let empty = g.empty();
    let blank = g.strip(empty);
    g.typed("whitespace", blank)
}

/// `package a.b;` and `import a.b.C;`.
fn namespaced(g: &mut Grammar, keyword: &str) -> RuleId {
    let segment = g.scalar("segment");
    let segment = g.typed("segment", segment);
    let segments = g.list("segments", segment, DelimiterSplitter::new("."));
    let statement = g.suffix(segments, ";");
    let statement = g.prefix(format!("{keyword} "), statement);
    let statement = g.strip(statement);
    g.typed(keyword, statement)
}

/// `<modifiers> <keyword> Name { <members> }`.
fn structure(g: &mut Grammar, keyword: &str, member: RuleId) -> RuleId {
    let name = g.scalar("name");
    let header = g.strip(name);
    structure_with_header(g, keyword, header, member)
}

/// `<modifiers> record Name(<components>) { <members> }`.
fn record(g: &mut Grammar, member: RuleId) -> RuleId {
    let declaration = declaration(g);
    let params = g.list("params", declaration, DelimiterSplitter::new(","));
    let params = g.strip(params);
    let params = g.suffix(params, ")");
    let name = g.scalar("name");
    let name = g.strip(name);
    let header = g.infix(name, "(", params);
    let header = g.strip(header);
    structure_with_header(g, "record", header, member)
}

fn structure_with_header(g: &mut Grammar, keyword: &str, header: RuleId, member: RuleId) -> RuleId {
    // Modifiers never span a block or a statement, so a keyword found
    // inside a nested body cannot claim the enclosing header.
    let modifiers = g.scalar("modifiers");
    let modifiers = g.exclude("{};", modifiers);
    let modifiers = g.strip(modifiers);
    let body = g.list("body", member, FoldingSplitter::statements());
    let body = g.strip(body);
    let body = g.suffix(body, "}");
    let rest = g.infix(header, "{", body);
    let structure = g.infix(modifiers, format!("{keyword} "), rest);
    g.typed(keyword, structure)
}

/// `Type name`, with the type nested as its own node.
fn declaration(g: &mut Grammar) -> RuleId {
    let type_name = g.scalar("name");
    let type_node = g.typed("type", type_name);
    let type_field = g.child("type", type_node);
    let name = g.scalar("name");
    let name = g.strip(name);
    let declaration = g.infix(type_field, " ", name);
    let declaration = g.strip(declaration);
    g.typed("declaration", declaration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticKind;

    fn strings<'a>(nodes: &'a [Node], key: &str) -> Vec<&'a str> {
        nodes.iter().filter_map(|n| n.find_string(key)).collect()
    }

    #[test]
    fn test_package_and_imports() {
        let root = read_java("package com.example;\nimport java.util.List;\n").unwrap();
        assert!(root.is("root"));
        let children = root.find_list("children").unwrap();
        let kinds: Vec<_> = children.iter().map(|c| c.kind().unwrap()).collect();
        assert_eq!(kinds, vec!["package", "import", "whitespace"]);

        let segments = children[1].find_list("segments").unwrap();
        assert_eq!(strings(segments, "segment"), vec!["java", "util", "List"]);
        assert!(segments.iter().all(|s| s.is("segment")));
    }

    #[test]
    fn test_class_with_modifiers() {
        let root = read_java("public final class Foo {}").unwrap();
        let class = &root.find_list("children").unwrap()[0];
        assert!(class.is("class"));
        assert_eq!(class.find_string("modifiers"), Some("public final"));
        assert_eq!(class.find_string("name"), Some("Foo"));
        assert_eq!(class.find_list("body"), Some(&[][..]));
    }

    #[test]
    fn test_nested_structures() {
        let source = "class Outer {\n  interface Shape {}\n  record Point(int x, long y) {}\n  class Inner {}\n}";
        let root = read_java(source).unwrap();
        let outer = &root.find_list("children").unwrap()[0];
        let body = outer.find_list("body").unwrap();
        let kinds: Vec<_> = body.iter().map(|c| c.kind().unwrap()).collect();
        assert_eq!(kinds, vec!["interface", "record", "class"]);
        assert_eq!(strings(body, "name"), vec!["Shape", "Point", "Inner"]);

        let params = body[1].find_list("params").unwrap();
        assert_eq!(strings(params, "name"), vec!["x", "y"]);
        let types: Vec<_> = params
            .iter()
            .filter_map(|p| p.find_node("type"))
            .filter_map(|t| t.find_string("name"))
            .collect();
        assert_eq!(types, vec!["int", "long"]);
    }

    #[test]
    fn test_keyword_in_nested_body_does_not_claim_header() {
        let root = read_java("class A { class B { interface C {} record R(int x) {} } }").unwrap();
        let outer = &root.find_list("children").unwrap()[0];
        let body = outer.find_list("body").unwrap();
        assert_eq!(body.len(), 1);
        assert!(body[0].is("class"));
        assert_eq!(body[0].find_string("name"), Some("B"));
        assert_eq!(body[0].find_string("modifiers"), Some(""));

        let inner = body[0].find_list("body").unwrap();
        let kinds: Vec<_> = inner.iter().map(|c| c.kind().unwrap()).collect();
        assert_eq!(kinds, vec!["interface", "record"]);
        assert_eq!(strings(inner, "name"), vec!["C", "R"]);
    }

    #[test]
    fn test_record_without_components() {
        let root = read_java("class A { record Empty() {} }").unwrap();
        let outer = &root.find_list("children").unwrap()[0];
        let record = &outer.find_list("body").unwrap()[0];
        assert!(record.is("record"));
        assert_eq!(record.find_list("params"), Some(&[][..]));
    }

    #[test]
    fn test_unmodeled_members_are_kept_verbatim() {
        let root = read_java("class A { int x; String s = \"};\"; }").unwrap();
        let outer = &root.find_list("children").unwrap()[0];
        let body = outer.find_list("body").unwrap();
        assert!(body.iter().all(|m| m.is("placeholder")));
        assert_eq!(
            strings(body, "content"),
            vec!["int x;", " String s = \"};\";"]
        );
    }

    #[test]
    fn test_unknown_top_level_statement() {
        let err = read_java("enum Color { RED }").unwrap_err();
        assert_eq!(err.kind(), DiagnosticKind::AllAlternativesFailed);
        assert_eq!(err.children().len(), 4);
    }
}
