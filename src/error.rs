//! Error types for hilite

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for highlighting operations
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Highlighter error types
#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("{file}:{line}: {message}")]
    Parse {
        file: String,
        line: usize,
        message: String,
    },

    #[error("No theme entry for category: {0}")]
    UnknownCategory(String),

    #[error("Required category missing: {0}")]
    MissingCategory(String),

    #[error("Invalid pattern for category {category}: {source}")]
    Regex {
        category: String,
        #[source]
        source: regex::Error,
    },

    #[error("Edit at {start}..{end} overlaps previous edit ending at {previous_end}")]
    OverlappingEdits {
        start: usize,
        end: usize,
        previous_end: usize,
    },

    #[error("Edit at {start}..{end} is outside text of length {len}")]
    OutOfBounds { start: usize, end: usize, len: usize },

    #[error("Offset {0} is not on a character boundary")]
    NotCharBoundary(usize),

    #[error("{0}")]
    Usage(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl HighlightError {
    /// Build a parse error for a given file and 1-based line number
    pub fn parse(file: &str, line: usize, message: impl Into<String>) -> Self {
        HighlightError::Parse {
            file: file.to_string(),
            line,
            message: message.into(),
        }
    }
}
