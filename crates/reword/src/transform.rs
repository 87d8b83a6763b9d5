//! Tree rewrite between the Java and Tuff shapes.
//!
//! [`hoist`] takes the `root` node produced by the Java reader and returns
//! a tree the Tuff writer accepts:
//!
//! - `package` and `whitespace` children are dropped,
//! - `import` children are collected into an [`ImportRegistry`] and replaced
//!   by one `extern let` node per namespace at the top of the tree; an
//!   import with no namespace is dropped,
//! - every `class` node, at any depth, becomes an `object`.

use reword_syntax::Node;
use serde::Serialize;

/// Leaves imported from one namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Namespace {
    pub segments: Vec<String>,
    pub leaves: Vec<String>,
}

/// Imports grouped by namespace, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportRegistry {
    namespaces: Vec<Namespace>,
}

impl ImportRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `leaf` under `segments`. A leaf already listed there is kept once.
    pub fn record(&mut self, segments: Vec<String>, leaf: String) {
        match self.namespaces.iter_mut().find(|ns| ns.segments == segments) {
            Some(namespace) => {
                if !namespace.leaves.contains(&leaf) {
                    namespace.leaves.push(leaf);
                }
            }
            None => self.namespaces.push(Namespace {
                segments,
                leaves: vec![leaf],
            }),
        }
    }

    pub fn namespaces(&self) -> &[Namespace] {
        &self.namespaces
    }

    /// Leaves recorded under exactly `segments`.
    pub fn leaves(&self, segments: &[&str]) -> Option<&[String]> {
        self.namespaces
            .iter()
            .find(|ns| ns.segments.iter().map(String::as_str).eq(segments.iter().copied()))
            .map(|ns| ns.leaves.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    /// One `extern let` node per namespace.
    fn extern_lets(&self) -> impl Iterator<Item = Node> + '_ {
        self.namespaces.iter().map(|ns| {
            Node::of_kind("extern let")
                .with_list(
                    "children",
                    ns.leaves
                        .iter()
                        .map(|leaf| Node::new().with_string("child", leaf.as_str()))
                        .collect(),
                )
                .with_list(
                    "namespace",
                    ns.segments
                        .iter()
                        .map(|segment| Node::new().with_string("segment", segment.as_str()))
                        .collect(),
                )
        })
    }
}

/// A rewritten tree together with the imports lifted out of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Transformed {
    pub tree: Node,
    pub imports: ImportRegistry,
}

/// Rewrite a Java `root` node into Tuff shape.
pub fn hoist(tree: Node) -> Transformed {
    let mut tree = tree;
    let children = tree.take_list("children").unwrap_or_default();

    let mut imports = ImportRegistry::new();
    let mut kept = Vec::with_capacity(children.len());
    for child in children {
        if child.is("package") || child.is("whitespace") {
            continue;
        }
        if child.is("import") {
            record_import(&mut imports, &child);
            continue;
        }
        kept.push(retype_classes(child));
    }

    for namespace in imports.namespaces() {
        tracing::debug!(
            namespace = %namespace.segments.join("."),
            leaves = namespace.leaves.len(),
            "hoisted imports"
        );
    }

    let children = imports.extern_lets().chain(kept).collect();
    Transformed {
        tree: tree.with_list("children", children),
        imports,
    }
}

fn record_import(imports: &mut ImportRegistry, import: &Node) {
    let mut segments: Vec<String> = import
        .find_list("segments")
        .unwrap_or_default()
        .iter()
        .filter_map(|segment| segment.find_string("segment"))
        .map(String::from)
        .collect();
    let Some(leaf) = segments.pop() else {
        tracing::warn!("import without segments skipped");
        return;
    };
    if segments.is_empty() {
        // `extern let { X } = ;` has no target form.
        tracing::warn!(leaf = %leaf, "import outside any namespace skipped");
        return;
    }
    imports.record(segments, leaf);
}

/// Turn every `class` into an `object`, descending through list fields.
fn retype_classes(node: Node) -> Node {
    let mut node = if node.is("class") {
        node.retype("object")
    } else {
        node
    };
    let keys: Vec<String> = node.list_keys().map(String::from).collect();
    for key in keys {
        let items = node.take_list(&key).unwrap_or_default();
        let items = items.into_iter().map(retype_classes).collect();
        node = node.with_list(key, items);
    }
    node
}
