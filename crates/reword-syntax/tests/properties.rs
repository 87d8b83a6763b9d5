//! Property tests for splitters and rule round-trips.

use proptest::prelude::*;
use reword_syntax::output::tuff_grammar;
use reword_syntax::{DelimiterSplitter, FoldingSplitter, Grammar, Node, Splitter};

fn identifier() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9_]{0,8}"
}

fn identifiers() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(identifier(), 1..6)
}

proptest! {
    #[test]
    fn statement_segments_concatenate_to_input(input in "[a-z ;{}'\"\\\\\n]{0,40}") {
        let segments = FoldingSplitter::statements().split(&input);
        prop_assert_eq!(segments.concat(), input);
        prop_assert!(segments.iter().all(|s| !s.is_empty()));
    }

    #[test]
    fn delimiter_segments_rejoin(parts in identifiers()) {
        let splitter = DelimiterSplitter::new(".");
        let joined = parts.join(splitter.delimiter());
        prop_assert_eq!(splitter.split(&joined), parts);
    }

    #[test]
    fn import_rule_round_trips(parts in identifiers()) {
        let mut g = Grammar::new();
        let segment = g.scalar("segment");
        let segment = g.typed("segment", segment);
        let segments = g.list("segments", segment, DelimiterSplitter::new("."));
        let body = g.suffix(segments, ";");
        let import = g.prefix("import ", body);
        let import = g.typed("import", import);

        let tree = Node::of_kind("import").with_list(
            "segments",
            parts
                .iter()
                .map(|p| Node::of_kind("segment").with_string("segment", p.as_str()))
                .collect(),
        );
        let text = g.generate(import, &tree).unwrap();
        prop_assert_eq!(text.clone(), format!("import {};", parts.join(".")));
        prop_assert_eq!(g.lex(import, &text).unwrap(), tree);
    }

    #[test]
    fn strip_ignores_surrounding_whitespace(name in identifier(), pad in "[ \t\n]{0,4}") {
        let mut g = Grammar::new();
        let scalar = g.scalar("name");
        let stripped = g.strip(scalar);
        let padded = format!("{pad}{name}{pad}");
        prop_assert_eq!(g.lex(stripped, &padded).unwrap(), g.lex(scalar, &name).unwrap());
    }

    #[test]
    fn extern_let_round_trips(children in identifiers(), namespace in identifiers()) {
        let tuff = tuff_grammar().unwrap();
        let tree = Node::of_kind("extern let")
            .with_list(
                "children",
                children.iter().map(|c| Node::new().with_string("child", c.as_str())).collect(),
            )
            .with_list(
                "namespace",
                namespace.iter().map(|s| Node::new().with_string("segment", s.as_str())).collect(),
            );
        let text = tuff.grammar.generate(tuff.member, &tree).unwrap();
        prop_assert_eq!(tuff.grammar.lex(tuff.member, &text).unwrap(), tree);
    }
}
