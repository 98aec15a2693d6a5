//! Artifact emission — renders a [`Tree`] as a C++ header/source pair.
//!
//! The declaration stream (header) holds one wrapper struct whose body is the
//! rendered tree, followed by an `extern` declaration of its only instance.
//! The definition stream (source) includes the header and defines that
//! instance:
//!
//! ```text
//! // resources.h                          // resources.cpp
//! #include <cstddef>                      #include "resources.h"
//!
//! struct R__ {                            R__ R;
//!
//!   struct ui__ {
//!     struct button__ {
//!       static constexpr size_t btn_ok         = 0x1;
//!     } button;
//!   } ui;
//!
//! };
//!
//! extern R__ R;
//! ```
//!
//! Each directory segment becomes `struct <seg>__ { ... } <seg>;` so the type
//! name never clashes with the member that uses the bare segment. A struct
//! that holds no leaves of its own is followed by a blank line.

use std::io::{self, Write};

use crate::layout::Layout;
use crate::tree::{PathNode, Tree};

/// Suffix that turns a segment into its struct type name.
const TYPE_SUFFIX: &str = "__";

/// Names shared between the two artifacts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifacts {
    /// Instance name of the outer wrapper; its type is `<wrapper>__`.
    pub wrapper: String,
    /// File name the definition stream includes.
    pub header_name: String,
}

impl Default for Artifacts {
    fn default() -> Self {
        Self {
            wrapper: "R".to_string(),
            header_name: "resources.h".to_string(),
        }
    }
}

impl Artifacts {
    pub fn wrapper_type(&self) -> String {
        format!("{}{}", self.wrapper, TYPE_SUFFIX)
    }
}

/// Writes both artifacts in one traversal.
pub struct Emitter<'a, D: Write, S: Write> {
    layout: Layout,
    decl: &'a mut D,
    defs: &'a mut S,
}

impl<'a, D: Write, S: Write> Emitter<'a, D, S> {
    pub fn new(layout: Layout, decl: &'a mut D, defs: &'a mut S) -> Self {
        Self { layout, decl, defs }
    }

    /// Opening of both artifacts: the header's wrapper struct and the
    /// source's include.
    pub fn write_prologue(&mut self, artifacts: &Artifacts) -> io::Result<()> {
        write!(
            self.decl,
            "#include <cstddef>\n\nstruct {} {{\n\n",
            artifacts.wrapper_type()
        )?;
        writeln!(self.defs, "#include \"{}\"", artifacts.header_name)
    }

    /// Closing of both artifacts: wrapper end plus the global instance.
    pub fn write_epilogue(&mut self, artifacts: &Artifacts) -> io::Result<()> {
        let ty = artifacts.wrapper_type();
        write!(self.decl, "}};\n\nextern {} {};\n", ty, artifacts.wrapper)?;
        write!(self.defs, "\n{} {};\n", ty, artifacts.wrapper)
    }

    /// Render every tag root as a top-level struct inside the wrapper.
    pub fn emit_tree(&mut self, tree: &Tree) -> io::Result<()> {
        for (tag, root) in tree.roots() {
            self.emit_directory(tag, root, 1)?;
        }
        Ok(())
    }

    /// Render the contents of `node` at `depth`: leaves first, then child
    /// directories, both in insertion order.
    fn emit_node(&mut self, node: &PathNode, depth: usize) -> io::Result<()> {
        for leaf in node.leaves() {
            writeln!(
                self.decl,
                "{}static constexpr size_t {} = {:#x};",
                self.layout.indent(depth),
                self.layout.pad_name(&leaf.name, depth),
                leaf.guid
            )?;
        }

        for (segment, child) in node.children() {
            self.emit_directory(segment, child, depth)?;
        }
        Ok(())
    }

    /// `struct <segment>__ { ... } <segment>;`, then a blank line if `node`
    /// is a pure directory.
    fn emit_directory(&mut self, segment: &str, node: &PathNode, depth: usize) -> io::Result<()> {
        let indent = self.layout.indent(depth);
        writeln!(self.decl, "{}struct {}{} {{", indent, segment, TYPE_SUFFIX)?;
        self.emit_node(node, depth + 1)?;
        writeln!(self.decl, "{}}} {};", indent, segment)?;
        if node.is_directory() {
            writeln!(self.decl)?;
        }
        Ok(())
    }
}

/// Render `tree` into `(header, source)` strings, prologue and epilogue
/// included.
pub fn render(
    tree: &Tree,
    layout: Layout,
    artifacts: &Artifacts,
) -> io::Result<(String, String)> {
    let mut decl = Vec::new();
    let mut defs = Vec::new();
    {
        let mut emitter = Emitter::new(layout, &mut decl, &mut defs);
        emitter.write_prologue(artifacts)?;
        emitter.emit_tree(tree)?;
        emitter.write_epilogue(artifacts)?;
    }
    Ok((
        String::from_utf8_lossy(&decl).into_owned(),
        String::from_utf8_lossy(&defs).into_owned(),
    ))
}
