//! Path tree: groups resource records into nested namespaces.

use indexmap::IndexMap;

use crate::document::ResourceDocument;
use crate::{Guid, PATH_SEPARATOR};

/// A `(name, guid)` pair placed directly at a node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Leaf {
    pub name: String,
    pub guid: Guid,
}

/// One level of the namespace tree.
///
/// Child segments and leaves are kept separately, both in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathNode {
    children: IndexMap<String, PathNode>,
    leaves: Vec<Leaf>,
}

impl PathNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Child directories, in order of first reference.
    pub fn children(&self) -> impl Iterator<Item = (&str, &PathNode)> {
        self.children.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn child(&self, segment: &str) -> Option<&PathNode> {
        self.children.get(segment)
    }

    /// Leaves directly at this node, in insertion order.
    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    /// True if the node only holds directories.
    pub fn is_directory(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Total number of leaves in this subtree.
    pub fn leaf_count(&self) -> usize {
        self.leaves.len() + self.children.values().map(PathNode::leaf_count).sum::<usize>()
    }

    /// Resolve `path` below this node and append `(name, guid)` there.
    ///
    /// The first segment runs from the character after the leading separator
    /// up to the next separator (or the end); the remainder, separator
    /// included, is resolved against that child. Nodes are created on first
    /// reference and shared afterwards.
    pub fn insert(&mut self, path: &str, name: &str, guid: Guid) {
        if path.is_empty() {
            self.leaves.push(Leaf {
                name: name.to_string(),
                guid,
            });
            return;
        }

        let (segment, rest) = split_first_segment(path);
        let child = self.children.entry(segment.to_string()).or_default();
        child.insert(rest, name, guid);
    }
}

/// Split `path` into its first segment and the remainder.
///
/// The leading character (normally the separator) is skipped; the remainder
/// starts at the next separator, or is empty.
pub(crate) fn split_first_segment(path: &str) -> (&str, &str) {
    let skip = path.chars().next().map_or(0, char::len_utf8);
    let tail = &path[skip..];
    match tail.find(PATH_SEPARATOR) {
        Some(pos) => (&tail[..pos], &tail[pos..]),
        None => (tail, ""),
    }
}

/// Namespace trees keyed by tag, in first-seen tag order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tree {
    roots: IndexMap<String, PathNode>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the tree for `docs`.
    ///
    /// Tags are collected first so every tag gets its root in first-seen
    /// order, then each tag's documents are inserted in input order.
    pub fn build(docs: &[ResourceDocument]) -> Self {
        let mut roots: IndexMap<String, PathNode> = IndexMap::new();
        for doc in docs {
            if !roots.contains_key(&doc.tag) {
                roots.insert(doc.tag.clone(), PathNode::new());
            }
        }

        for (tag, root) in roots.iter_mut() {
            for doc in docs.iter().filter(|d| &d.tag == tag) {
                root.insert(&doc.path, &doc.name, doc.guid);
            }
        }

        Self { roots }
    }

    /// Insert a single document, creating its tag root if needed.
    pub fn insert(&mut self, doc: &ResourceDocument) {
        self.roots
            .entry(doc.tag.clone())
            .or_default()
            .insert(&doc.path, &doc.name, doc.guid);
    }

    /// Tag roots in first-seen order.
    pub fn roots(&self) -> impl Iterator<Item = (&str, &PathNode)> {
        self.roots.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn root(&self, tag: &str) -> Option<&PathNode> {
        self.roots.get(tag)
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of leaves across all tags.
    pub fn leaf_count(&self) -> usize {
        self.roots.values().map(PathNode::leaf_count).sum()
    }
}
