//! Generic tree value shared by every rule.
//!
//! A [`Node`] carries an optional discriminant plus three field maps:
//! strings, nested nodes and node lists. Looking a field up under the wrong
//! map yields `None`.
//!
//! Nodes are values. Builders, [`Node::merge`] and [`Node::retype`] consume
//! the node and hand back a new one, so a tree produced by an abandoned
//! parse branch cannot leak into the tree of the branch that succeeded.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    strings: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    nodes: BTreeMap<String, Node>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    lists: BTreeMap<String, Vec<Node>>,
}

impl Node {
    /// An untyped, empty node.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty node stamped with `kind`.
    pub fn of_kind(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Self::default()
        }
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    /// Whether the discriminant is set and equals `kind`.
    pub fn is(&self, kind: &str) -> bool {
        self.kind.as_deref() == Some(kind)
    }

    pub fn with_string(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.strings.insert(key.into(), value.into());
        self
    }

    pub fn with_node(mut self, key: impl Into<String>, node: Node) -> Self {
        self.nodes.insert(key.into(), node);
        self
    }

    pub fn with_list(mut self, key: impl Into<String>, nodes: Vec<Node>) -> Self {
        self.lists.insert(key.into(), nodes);
        self
    }

    pub fn find_string(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }

    pub fn find_node(&self, key: &str) -> Option<&Node> {
        self.nodes.get(key)
    }

    pub fn find_list(&self, key: &str) -> Option<&[Node]> {
        self.lists.get(key).map(Vec::as_slice)
    }

    /// Mutable access to a list field, used by tree rewrites.
    pub fn list_mut(&mut self, key: &str) -> Option<&mut Vec<Node>> {
        self.lists.get_mut(key)
    }

    /// Remove and return a list field.
    pub fn take_list(&mut self, key: &str) -> Option<Vec<Node>> {
        self.lists.remove(key)
    }

    /// Names of all list fields, in key order.
    pub fn list_keys(&self) -> impl Iterator<Item = &str> {
        self.lists.keys().map(String::as_str)
    }

    /// Combine the fields of two nodes.
    ///
    /// On key collisions `other` wins. The discriminant of `self` is kept;
    /// if `self` has none, the one from `other` is used.
    pub fn merge(mut self, other: Node) -> Self {
        self.strings.extend(other.strings);
        self.nodes.extend(other.nodes);
        self.lists.extend(other.lists);
        if self.kind.is_none() {
            self.kind = other.kind;
        }
        self
    }

    /// Replace the discriminant.
    pub fn retype(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty() && self.nodes.is_empty() && self.lists.is_empty()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.as_deref().unwrap_or("?"))?;
        f.write_str("{")?;
        let mut first = true;
        let mut sep = |f: &mut fmt::Formatter<'_>| -> fmt::Result {
            if first {
                first = false;
                Ok(())
            } else {
                f.write_str(", ")
            }
        };
        for (key, value) in &self.strings {
            sep(f)?;
            write!(f, "{key}={value:?}")?;
        }
        for (key, node) in &self.nodes {
            sep(f)?;
            write!(f, "{key}={node}")?;
        }
        for (key, list) in &self.lists {
            sep(f)?;
            write!(f, "{key}=[")?;
            for (i, node) in list.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{node}")?;
            }
            f.write_str("]")?;
        }
        f.write_str("}")
    }
}
