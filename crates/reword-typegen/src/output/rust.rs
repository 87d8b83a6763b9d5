//! Rust code generator.
//!
//! Products become structs with a `KIND` constant, variant groups become
//! enums, and every type gets `deserialize`/`serialize` methods that convert
//! to and from the generic tree. Paths are fully qualified so the output can
//! be `include!`d anywhere.

use crate::ir::{Field, FieldType, Schema, Shape, TypeDef};
use crate::traits::Backend;
use std::fmt::Write;

/// Static instance of the Rust backend for registry.
pub static RUST_BACKEND: RustBackend = RustBackend;

/// Rust backend using default options.
pub struct RustBackend;

impl Backend for RustBackend {
    fn name(&self) -> &'static str {
        "rust"
    }

    fn language(&self) -> &'static str {
        "rust"
    }

    fn extension(&self) -> &'static str {
        "rs"
    }

    fn generate(&self, schema: &Schema) -> String {
        generate_rust(schema, &RustOptions::default())
    }
}

/// Options for Rust code generation.
#[derive(Debug, Clone)]
pub struct RustOptions {
    /// Path of the tree type the generated code converts to and from.
    pub node_path: String,
    /// Derives applied to every generated type.
    pub derives: Vec<String>,
}

impl Default for RustOptions {
    fn default() -> Self {
        Self {
            node_path: "::reword_syntax::Node".to_string(),
            derives: vec!["Debug".into(), "Clone".into(), "PartialEq".into()],
        }
    }
}

const RESULT: &str = "::std::result::Result";
const STRING: &str = "::std::string::String";
const VEC: &str = "::std::vec::Vec";
const BOX: &str = "::std::boxed::Box";

/// Generate Rust types for every definition in `schema`.
pub fn generate_rust(schema: &Schema, options: &RustOptions) -> String {
    let mut out = String::new();
    out.push_str("// @generated by reword-typegen. Do not edit.\n");

    for def in &schema.definitions {
        out.push('\n');
        match &def.shape {
            Shape::Product(fields) => write_product(&mut out, def, fields, options),
            Shape::Group(members) => write_group(&mut out, def, members, options),
        }
        for group in schema.groups_of(&def.name) {
            write_from(&mut out, &def.name, &group.name);
        }
    }

    out
}

fn write_derives(out: &mut String, options: &RustOptions) {
    if !options.derives.is_empty() {
        let _ = writeln!(out, "#[derive({})]", options.derives.join(", "));
    }
}

fn write_product(out: &mut String, def: &TypeDef, fields: &[Field], options: &RustOptions) {
    let name = rust_ident(&def.name);
    let node = &options.node_path;

    write_derives(out, options);
    let _ = writeln!(out, "pub struct {name} {{");
    for field in fields {
        let _ = writeln!(out, "    pub {}: {},", rust_ident(&field.name), field_type(&field.ty));
    }
    out.push_str("}\n\n");

    let _ = writeln!(out, "impl {name} {{");
    let _ = writeln!(out, "    pub const KIND: &'static str = {:?};", def.kind());
    out.push('\n');

    // deserialize
    let _ = writeln!(
        out,
        "    pub fn deserialize(node: &{node}) -> {RESULT}<Self, {STRING}> {{"
    );
    out.push_str("        if !node.is(Self::KIND) {\n");
    let _ = writeln!(out, "            return {RESULT}::Err(::std::format!(");
    let _ = writeln!(
        out,
        "                \"expected kind '{{}}' on type '{}', found '{{}}'\",",
        def.name
    );
    out.push_str("                Self::KIND,\n");
    out.push_str("                node.kind().unwrap_or(\"\"),\n");
    out.push_str("            ));\n");
    out.push_str("        }\n");
    let _ = writeln!(out, "        {RESULT}::Ok(Self {{");
    for field in fields {
        let _ = writeln!(
            out,
            "            {}: {},",
            rust_ident(&field.name),
            read_field(def, field)
        );
    }
    out.push_str("        })\n");
    out.push_str("    }\n\n");

    // serialize
    let _ = writeln!(
        out,
        "    pub fn serialize(&self) -> {RESULT}<{node}, {STRING}> {{"
    );
    let _ = writeln!(out, "        {RESULT}::Ok({node}::of_kind(Self::KIND)");
    for field in fields {
        let _ = writeln!(out, "            {}", write_field(def, field));
    }
    out.push_str("        )\n");
    out.push_str("    }\n");
    out.push_str("}\n");
}

fn write_group(out: &mut String, def: &TypeDef, members: &[String], options: &RustOptions) {
    let name = rust_ident(&def.name);
    let node = &options.node_path;

    write_derives(out, options);
    let _ = writeln!(out, "pub enum {name} {{");
    for member in members {
        let member = rust_ident(member);
        let _ = writeln!(out, "    {member}({member}),");
    }
    out.push_str("}\n\n");

    let _ = writeln!(out, "impl {name} {{");
    let _ = writeln!(
        out,
        "    pub fn deserialize(node: &{node}) -> {RESULT}<Self, {STRING}> {{"
    );
    let _ = writeln!(out, "        let mut failures = {VEC}::new();");
    for member in members {
        let ident = rust_ident(member);
        let _ = writeln!(out, "        match {ident}::deserialize(node) {{");
        let _ = writeln!(
            out,
            "            {RESULT}::Ok(value) => return {RESULT}::Ok(Self::{ident}(value)),"
        );
        let _ = writeln!(
            out,
            "            {RESULT}::Err(cause) => failures.push(::std::format!(\"{member}: {{cause}}\")),"
        );
        out.push_str("        }\n");
    }
    let _ = writeln!(out, "        {RESULT}::Err(::std::format!(");
    let _ = writeln!(
        out,
        "            \"no variant of '{}' matched: {{}}\",",
        def.name
    );
    out.push_str("            failures.join(\"; \"),\n");
    out.push_str("        ))\n");
    out.push_str("    }\n\n");

    let _ = writeln!(
        out,
        "    pub fn serialize(&self) -> {RESULT}<{node}, {STRING}> {{"
    );
    out.push_str("        match self {\n");
    for member in members {
        let ident = rust_ident(member);
        let _ = writeln!(out, "            Self::{ident}(value) => value.serialize(),");
    }
    out.push_str("        }\n");
    out.push_str("    }\n");
    out.push_str("}\n");
}

fn write_from(out: &mut String, member: &str, group: &str) {
    let member = rust_ident(member);
    let group = rust_ident(group);
    out.push('\n');
    let _ = writeln!(out, "impl ::std::convert::From<{member}> for {group} {{");
    let _ = writeln!(out, "    fn from(value: {member}) -> Self {{");
    let _ = writeln!(out, "        Self::{member}(value)");
    out.push_str("    }\n");
    out.push_str("}\n");
}

fn field_type(ty: &FieldType) -> String {
    match ty {
        FieldType::Scalar => STRING.to_string(),
        FieldType::Node(target) => format!("{BOX}<{}>", rust_ident(target)),
        FieldType::List(target) => format!("{VEC}<{}>", rust_ident(target)),
    }
}

/// Expression extracting `field` from `node`, failing fast with `?`.
fn read_field(def: &TypeDef, field: &Field) -> String {
    let key = &field.name;
    let owner = &def.name;
    let missing = format!(
        ".ok_or_else(|| {STRING}::from(\"missing field '{key}' on type '{owner}'\"))?"
    );
    let wrap = format!(
        ".map_err(|cause| ::std::format!(\"failed to deserialize field '{key}' on type '{owner}': {{cause}}\"))?"
    );
    match &field.ty {
        FieldType::Scalar => {
            format!("node.find_string({key:?}).map({STRING}::from){missing}")
        }
        FieldType::Node(target) => {
            let target = rust_ident(target);
            format!("{BOX}::new({target}::deserialize(node.find_node({key:?}){missing}){wrap})")
        }
        FieldType::List(target) => {
            let target = rust_ident(target);
            format!(
                "node.find_list({key:?}){missing}.iter().map({target}::deserialize).collect::<{RESULT}<{VEC}<_>, _>>(){wrap}"
            )
        }
    }
}

/// Builder call adding `field` of `self` to a node.
fn write_field(def: &TypeDef, field: &Field) -> String {
    let key = &field.name;
    let owner = &def.name;
    let ident = rust_ident(key);
    let wrap = format!(
        ".map_err(|cause| ::std::format!(\"failed to serialize field '{key}' on type '{owner}': {{cause}}\"))?"
    );
    match &field.ty {
        FieldType::Scalar => format!(".with_string({key:?}, self.{ident}.clone())"),
        FieldType::Node(_) => format!(".with_node({key:?}, self.{ident}.serialize(){wrap})"),
        FieldType::List(target) => {
            let target = rust_ident(target);
            format!(
                ".with_list({key:?}, self.{ident}.iter().map({target}::serialize).collect::<{RESULT}<{VEC}<_>, _>>(){wrap})"
            )
        }
    }
}

/// Identifier safe to use in generated code.
fn rust_ident(name: &str) -> String {
    match name {
        "self" | "Self" | "super" | "crate" => format!("{name}_"),
        _ if RUST_KEYWORDS.contains(&name) => format!("r#{name}"),
        _ => name.to_string(),
    }
}

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "box", "break", "const", "continue", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
    "pub", "ref", "return", "static", "struct", "trait", "true", "try", "type", "unsafe", "use",
    "where", "while", "yield", "abstract", "become", "do", "final", "macro", "override", "priv",
    "typeof", "unsized", "virtual",
];
