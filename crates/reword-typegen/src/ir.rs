//! Schema IR for tree node types.
//!
//! A [`Schema`] is an ordered list of [`TypeDef`]s, each either a product
//! (named fields) or a variant group (a closed set of other types). The IR
//! is what the grammar DSL parses into and what every backend consumes.

use reword_syntax::{Context, Diagnostic, DiagnosticKind, Node, Outcome};
use serde::{Deserialize, Serialize};

/// A complete set of type definitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub definitions: Vec<TypeDef>,
}

/// One named type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    pub name: String,
    /// 1-based line of the declaration in its source, 0 if built in code.
    #[serde(default)]
    pub line: usize,
    pub shape: Shape,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// A node with a fixed set of fields.
    Product(Vec<Field>),
    /// Exactly one of the listed types.
    Group(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub ty: FieldType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// A string field.
    Scalar,
    /// A nested node of the named type.
    Node(String),
    /// An ordered list of nodes of the named type.
    List(String),
}

impl FieldType {
    /// The referenced type, if any.
    pub fn target(&self) -> Option<&str> {
        match self {
            FieldType::Scalar => None,
            FieldType::Node(name) | FieldType::List(name) => Some(name),
        }
    }
}

impl TypeDef {
    pub fn product(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            line: 0,
            shape: Shape::Product(fields),
        }
    }

    pub fn group(name: impl Into<String>, members: Vec<String>) -> Self {
        Self {
            name: name.into(),
            line: 0,
            shape: Shape::Group(members),
        }
    }

    /// The discriminant carried by nodes of this type.
    pub fn kind(&self) -> String {
        self.name.to_lowercase()
    }
}

impl Field {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, def: TypeDef) {
        self.definitions.push(def);
    }

    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.definitions.iter().find(|def| def.name == name)
    }

    /// Groups that list `name` as a member, in declaration order.
    pub fn groups_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a TypeDef> + 'a {
        self.definitions.iter().filter(move |def| match &def.shape {
            Shape::Group(members) => members.iter().any(|m| m == name),
            Shape::Product(_) => false,
        })
    }

    /// Check `node` against `type_name` the way a generated deserializer would.
    pub fn validate(&self, type_name: &str, node: &Node) -> Outcome<()> {
        let Some(def) = self.get(type_name) else {
            return Err(Diagnostic::not_configured(
                format!("type '{type_name}' is not declared"),
                Context::tree(node),
            ));
        };
        match &def.shape {
            Shape::Product(fields) => self.validate_product(def, fields, node),
            Shape::Group(members) => self.validate_group(def, members, node),
        }
    }

    fn validate_product(&self, def: &TypeDef, fields: &[Field], node: &Node) -> Outcome<()> {
        let kind = def.kind();
        if !node.is(&kind) {
            return Err(Diagnostic::mismatch(
                format!("expected kind '{kind}' on type '{}'", def.name),
                Context::tree(node),
            ));
        }
        for field in fields {
            let missing = || {
                Diagnostic::missing_field(
                    format!("missing field '{}' on type '{}'", field.name, def.name),
                    Context::tree(node),
                )
            };
            let nested = |cause: Diagnostic| {
                Diagnostic::with_children(
                    cause.kind(),
                    format!("failed to deserialize field '{}' on type '{}'", field.name, def.name),
                    Context::tree(node),
                    vec![cause],
                )
            };
            match &field.ty {
                FieldType::Scalar => {
                    node.find_string(&field.name).ok_or_else(missing)?;
                }
                FieldType::Node(target) => {
                    let child = node.find_node(&field.name).ok_or_else(missing)?;
                    self.validate(target, child).map_err(nested)?;
                }
                FieldType::List(target) => {
                    let items = node.find_list(&field.name).ok_or_else(missing)?;
                    for item in items {
                        self.validate(target, item).map_err(nested)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn validate_group(&self, def: &TypeDef, members: &[String], node: &Node) -> Outcome<()> {
        let mut failures = Vec::new();
        for member in members {
            match self.validate(member, node) {
                Ok(()) => return Ok(()),
                Err(cause) => failures.push(cause),
            }
        }
        Err(Diagnostic::with_children(
            DiagnosticKind::AllAlternativesFailed,
            format!("no variant of '{}' matched", def.name),
            Context::tree(node),
            failures,
        ))
    }
}
