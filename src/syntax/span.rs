//! Spans and edits over a text buffer
//!
//! Every transformation of the buffer (masking, unmasking and color
//! insertion) is expressed as a list of edits applied by [`splice`].

use crate::error::{HighlightError, Result};

/// A regex match within a text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Byte offset where this span starts (inclusive)
    pub start: usize,
    /// Byte offset where this span ends (exclusive)
    pub end: usize,
    /// The text covered by the span when it was recorded
    pub text: String,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Get the length of this span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }
}

/// Replacement of the byte range `[start, end)` of a base string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub start: usize,
    pub end: usize,
    pub replacement: String,
}

impl Edit {
    pub fn new(start: usize, end: usize, replacement: impl Into<String>) -> Self {
        Self {
            start,
            end,
            replacement: replacement.into(),
        }
    }
}

/// Apply edits to `base`, returning the rewritten text
///
/// Edits are given in terms of offsets into `base` and must be sorted
/// ascending and non-overlapping. The growth or shrinkage caused by
/// earlier edits never has to be accounted for by the caller.
pub fn splice<'a, I>(base: &str, edits: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Edit>,
{
    let mut out = String::with_capacity(base.len());
    let mut pos = 0;

    for edit in edits {
        if edit.start > edit.end || edit.end > base.len() {
            return Err(HighlightError::OutOfBounds {
                start: edit.start,
                end: edit.end,
                len: base.len(),
            });
        }
        if edit.start < pos {
            return Err(HighlightError::OverlappingEdits {
                start: edit.start,
                end: edit.end,
                previous_end: pos,
            });
        }
        for offset in [edit.start, edit.end] {
            if !base.is_char_boundary(offset) {
                return Err(HighlightError::NotCharBoundary(offset));
            }
        }

        out.push_str(&base[pos..edit.start]);
        out.push_str(&edit.replacement);
        pos = edit.end;
    }

    out.push_str(&base[pos..]);
    Ok(out)
}
