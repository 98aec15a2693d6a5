//! Column layout — indentation and value alignment for emitted constants.
//!
//! Every constant is indented by its depth and its name is padded so the
//! `=` column lines up across the whole artifact, whatever the nesting:
//!
//! ```text
//!   struct ui__ {
//!     static constexpr size_t quit             = 0x3;
//!     struct button__ {
//!       static constexpr size_t btn_ok         = 0x1;
//!       static constexpr size_t btn_cancel     = 0x2;
//!     } button;
//! ```
//!
//! Indentation plus padded name always sums to `ALIGN_COLUMN`; names that
//! are already too long get no padding at all.

/// Column that indentation plus padded name fills.
pub const ALIGN_COLUMN: usize = 20;

/// Spaces per nesting level.
pub const INDENT_WIDTH: usize = 2;

/// Number of trailing spaces for `name` at `depth`.
///
/// `align_column - indent_width * depth - name_len`, saturating at zero.
#[inline]
pub const fn padding_for(name_len: usize, depth: usize, align_column: usize, indent_width: usize) -> usize {
    align_column
        .saturating_sub(indent_width * depth)
        .saturating_sub(name_len)
}

/// Formatting parameters handed to the emitter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub align_column: usize,
    pub indent_width: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            align_column: ALIGN_COLUMN,
            indent_width: INDENT_WIDTH,
        }
    }
}

impl Layout {
    pub const fn new(align_column: usize, indent_width: usize) -> Self {
        Self {
            align_column,
            indent_width,
        }
    }

    /// Leading whitespace for a line at `depth`.
    #[inline]
    pub fn indent(&self, depth: usize) -> String {
        " ".repeat(self.indent_width * depth)
    }

    /// `name` followed by its alignment padding at `depth`.
    pub fn pad_name(&self, name: &str, depth: usize) -> String {
        let pad = padding_for(name.len(), depth, self.align_column, self.indent_width);
        let mut padded = String::with_capacity(name.len() + pad);
        padded.push_str(name);
        padded.extend(std::iter::repeat_n(' ', pad));
        padded
    }
}
