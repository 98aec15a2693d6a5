//! Resource records, the input of the tree builder.

use serde::{Deserialize, Serialize};

use crate::tree::split_first_segment;
use crate::Guid;

/// One parsed resource description.
///
/// `path` is either empty (leaf sits directly under the tag root) or starts
/// with [`crate::PATH_SEPARATOR`], e.g. `/button/ok`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceDocument {
    /// Groups documents into independent trees.
    pub tag: String,
    /// Leaf identifier.
    pub name: String,
    /// Slash-delimited location inside the tag's tree.
    #[serde(default)]
    pub path: String,
    /// Emitted numeric value.
    pub guid: Guid,
}

impl ResourceDocument {
    pub fn new(
        tag: impl Into<String>,
        name: impl Into<String>,
        path: impl Into<String>,
        guid: Guid,
    ) -> Self {
        Self {
            tag: tag.into(),
            name: name.into(),
            path: path.into(),
            guid,
        }
    }

    /// Path segments in order, e.g. `/button/ok` → `["button", "ok"]`.
    ///
    /// Mirrors the resolution done by [`crate::PathNode::insert`], including
    /// empty segments for doubled or trailing separators.
    pub fn segments(&self) -> Vec<&str> {
        let mut segments = Vec::new();
        let mut rest = self.path.as_str();
        while !rest.is_empty() {
            let (segment, remainder) = split_first_segment(rest);
            segments.push(segment);
            rest = remainder;
        }
        segments
    }
}
