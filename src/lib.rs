//! # Hierarchical Resource ID Tables (resource-ids)
//!
//! Turns flat resource records (`tag`, `name`, `path`, `guid`) into a nested
//! namespace tree and renders that tree as a table of numeric constants.
//!
//! ## Design
//!
//! Every record names a slash-delimited location. Records sharing a `tag`
//! form one tree; path segments become nested structures and the record
//! itself becomes a constant at the end of its path:
//!
//! ```text
//! { tag: ui, name: btn_ok,     path: /button/ok,     guid: 1 }
//! { tag: ui, name: btn_cancel, path: /button/cancel, guid: 2 }
//!
//! struct R__ {
//!
//!   struct ui__ {
//!     struct button__ {
//!       struct ok__ {
//!         static constexpr size_t btn_ok       = 0x1;
//!       } ok;
//!     ...
//! ```
//!
//! Ordering is never sorted: tags, segments and leaves keep the order in
//! which records were supplied. Duplicate names or GUIDs are kept as-is.
//!
//! ## Usage
//!
//! ```ignore
//! use resource_ids::{Emitter, Layout, ResourceDocument, Tree};
//!
//! let tree = Tree::build(&docs);
//! let mut header = Vec::new();
//! let mut source = Vec::new();
//! Emitter::new(Layout::default(), &mut header, &mut source).emit_tree(&tree)?;
//! ```
//!
//! File discovery, parsing, caching and the incremental rebuild check live
//! in the `resource-ids-build` crate.

pub mod document;
pub mod emit;
pub mod layout;
pub mod tree;

pub use document::ResourceDocument;
pub use emit::{Artifacts, Emitter, render};
pub use layout::{ALIGN_COLUMN, INDENT_WIDTH, Layout, padding_for};
pub use tree::{Leaf, PathNode, Tree};

/// Numeric resource identifier attached to a leaf.
///
/// Rendered as lowercase hexadecimal with a `0x` prefix.
pub type Guid = u64;

/// Path separator used by [`ResourceDocument::path`].
pub const PATH_SEPARATOR: char = '/';
