//! Declaration outline of a Java compilation unit.

use crate::ast::{Member, Root, RootMember};
use crate::error::Error;
use serde::Serialize;
use std::fmt;

/// One declared type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub kind: &'static str,
    pub name: String,
    /// Record components as `Type name`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<String>,
    /// Nesting level, 0 for top-level types.
    pub depth: usize,
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:indent$}{} {}", "", self.kind, self.name, indent = self.depth * 2)?;
        if self.kind == "record" {
            write!(f, "({})", self.params.join(", "))?;
        }
        Ok(())
    }
}

/// Lex `source` as Java and list its declared types.
pub fn outline_source(source: &str) -> Result<Vec<Entry>, Error> {
    let tree = reword_syntax::read_java(source)?;
    let root = Root::deserialize(&tree).map_err(Error::Ast)?;
    Ok(outline(&root))
}

/// Every class, interface and record in declaration order.
pub fn outline(root: &Root) -> Vec<Entry> {
    let mut entries = Vec::new();
    for child in &root.children {
        if let RootMember::Class(class) = child {
            entries.push(Entry {
                kind: "class",
                name: class.name.clone(),
                params: Vec::new(),
                depth: 0,
            });
            collect(&class.body, 1, &mut entries);
        }
    }
    entries
}

fn collect(members: &[Member], depth: usize, entries: &mut Vec<Entry>) {
    for member in members {
        let (kind, name, params, body) = match member {
            Member::Class(class) => ("class", &class.name, Vec::new(), &class.body),
            Member::Interface(interface) => {
                ("interface", &interface.name, Vec::new(), &interface.body)
            }
            Member::Record(record) => {
                let params = record
                    .params
                    .iter()
                    .map(|p| format!("{} {}", p.r#type.name, p.name))
                    .collect();
                ("record", &record.name, params, &record.body)
            }
            Member::Placeholder(_) => continue,
        };
        entries.push(Entry {
            kind,
            name: name.clone(),
            params,
            depth,
        });
        collect(body, depth + 1, entries);
    }
}
