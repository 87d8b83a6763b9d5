//! Grammar DSL to IR parser.
//!
//! One declaration per line:
//!
//! ```text
//! # comment
//! Type = name
//! Declaration = Type type, name
//! Record = name, [Declaration params]
//! Structure = Class | Interface | Record
//! ```
//!
//! A bare identifier is a string field, `Type field` a nested node and
//! `[Type field]` a list. `A | B` declares a variant group. Blank lines,
//! comments and lines without `=` are skipped. References are resolved after
//! every line is read, so declarations may appear in any order. A group may
//! not reach itself through its member groups.

use crate::ir::{Field, FieldType, Schema, Shape, TypeDef};
use std::collections::{HashMap, HashSet};

/// Errors while reading the grammar DSL. Lines are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: malformed field '{decl}'")]
    MalformedField { line: usize, decl: String },

    #[error("line {line}: '{name}' is not a valid identifier")]
    InvalidName { line: usize, name: String },

    #[error("line {line}: type '{name}' is already declared")]
    DuplicateType { line: usize, name: String },

    #[error("line {line}: field '{field}' appears twice in '{name}'")]
    DuplicateField {
        line: usize,
        name: String,
        field: String,
    },

    #[error("line {line}: '{member}' appears twice in group '{name}'")]
    DuplicateMember {
        line: usize,
        name: String,
        member: String,
    },

    #[error("line {line}: group '{name}' has no members")]
    EmptyGroup { line: usize, name: String },

    #[error("line {line}: unknown type '{name}'")]
    UnknownType { line: usize, name: String },

    #[error("line {line}: group '{name}' contains itself")]
    CyclicGroup { line: usize, name: String },
}

/// Parse grammar DSL text into a [`Schema`].
pub fn parse_grammar(input: &str) -> Result<Schema, ParseError> {
    let mut schema = Schema::new();
    let mut names = HashSet::new();

    for (index, raw) in input.lines().enumerate() {
        let line = index + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        let Some((name, decl)) = text.split_once('=') else {
            continue;
        };
        let name = identifier(name.trim(), line)?;
        if !names.insert(name.clone()) {
            return Err(ParseError::DuplicateType { line, name });
        }

        let shape = if decl.contains('|') {
            parse_group(&name, decl, line)?
        } else {
            parse_product(&name, decl, line)?
        };
        schema.add(TypeDef { name, line, shape });
    }

    resolve(&schema)?;
    tracing::debug!(types = schema.definitions.len(), "parsed grammar");
    Ok(schema)
}

fn parse_group(name: &str, decl: &str, line: usize) -> Result<Shape, ParseError> {
    let mut members: Vec<String> = Vec::new();
    for member in decl.split('|').map(str::trim).filter(|m| !m.is_empty()) {
        let member = identifier(member, line)?;
        if members.contains(&member) {
            return Err(ParseError::DuplicateMember {
                line,
                name: name.to_string(),
                member,
            });
        }
        members.push(member);
    }
    if members.is_empty() {
        return Err(ParseError::EmptyGroup {
            line,
            name: name.to_string(),
        });
    }
    Ok(Shape::Group(members))
}

fn parse_product(name: &str, decl: &str, line: usize) -> Result<Shape, ParseError> {
    let mut fields: Vec<Field> = Vec::new();
    if decl.trim().is_empty() {
        return Ok(Shape::Product(fields));
    }
    for part in decl.split(',') {
        let field = parse_field(part.trim(), line)?;
        if fields.iter().any(|f| f.name == field.name) {
            return Err(ParseError::DuplicateField {
                line,
                name: name.to_string(),
                field: field.name,
            });
        }
        fields.push(field);
    }
    Ok(Shape::Product(fields))
}

fn parse_field(decl: &str, line: usize) -> Result<Field, ParseError> {
    let malformed = || ParseError::MalformedField {
        line,
        decl: decl.to_string(),
    };

    let (inner, list) = match decl.strip_prefix('[') {
        Some(rest) => (rest.strip_suffix(']').ok_or_else(malformed)?.trim(), true),
        None if decl.ends_with(']') => return Err(malformed()),
        None => (decl, false),
    };

    let words: Vec<&str> = inner.split_whitespace().collect();
    match (words.as_slice(), list) {
        ([field], false) => Ok(Field::new(identifier(field, line)?, FieldType::Scalar)),
        ([ty, field], false) => Ok(Field::new(
            identifier(field, line)?,
            FieldType::Node(identifier(ty, line)?),
        )),
        ([ty, field], true) => Ok(Field::new(
            identifier(field, line)?,
            FieldType::List(identifier(ty, line)?),
        )),
        _ => Err(malformed()),
    }
}

fn identifier(text: &str, line: usize) -> Result<String, ParseError> {
    let mut chars = text.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(text.to_string())
    } else {
        Err(ParseError::InvalidName {
            line,
            name: text.to_string(),
        })
    }
}

/// Second pass: every referenced type must be declared somewhere.
fn resolve(schema: &Schema) -> Result<(), ParseError> {
    for def in &schema.definitions {
        let references: Vec<&str> = match &def.shape {
            Shape::Group(members) => members.iter().map(String::as_str).collect(),
            Shape::Product(fields) => fields.iter().filter_map(|f| f.ty.target()).collect(),
        };
        if let Some(missing) = references.into_iter().find(|r| schema.get(r).is_none()) {
            return Err(ParseError::UnknownType {
                line: def.line,
                name: missing.to_string(),
            });
        }
    }

    let mut visits = HashMap::new();
    for def in &schema.definitions {
        visit_group(schema, &def.name, &mut visits)?;
    }
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    Active,
    Done,
}

/// Depth-first walk over group-to-group membership.
fn visit_group<'a>(
    schema: &'a Schema,
    name: &'a str,
    visits: &mut HashMap<&'a str, Visit>,
) -> Result<(), ParseError> {
    let Some(def) = schema.get(name) else {
        return Ok(());
    };
    let Shape::Group(members) = &def.shape else {
        return Ok(());
    };
    match visits.get(name) {
        Some(Visit::Done) => return Ok(()),
        Some(Visit::Active) => {
            return Err(ParseError::CyclicGroup {
                line: def.line,
                name: name.to_string(),
            });
        }
        None => {}
    }
    visits.insert(name, Visit::Active);
    for member in members {
        visit_group(schema, member, visits)?;
    }
    visits.insert(name, Visit::Done);
    Ok(())
}
