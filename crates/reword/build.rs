//! Build script for reword - compiles the Java grammar into typed AST nodes.

use reword_typegen::{RustOptions, generate_rust, parse_grammar};
use std::path::PathBuf;

const GRAMMAR: &str = "grammar/java.grammar";

fn main() {
    println!("cargo:rerun-if-changed={GRAMMAR}");

    let source = std::fs::read_to_string(GRAMMAR)
        .unwrap_or_else(|e| panic!("failed to read {GRAMMAR}: {e}"));
    let schema = parse_grammar(&source).unwrap_or_else(|e| panic!("{GRAMMAR}: {e}"));
    let code = generate_rust(&schema, &RustOptions::default());

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    std::fs::write(out_dir.join("java_ast.rs"), code).expect("failed to write java_ast.rs");
}
