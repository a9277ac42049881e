//! Syntax highlighting module
//!
//! This module provides the highlight engine:
//! - Theme and syntax file parsing
//! - Masking of strings and comments
//! - Per-rule colorization passes

mod style;
mod span;
mod mask;
mod rules;
mod theme;
mod highlight;

pub use style::ColorMode;
pub use highlight::{read_file, HighlightOptions, Highlighter};
