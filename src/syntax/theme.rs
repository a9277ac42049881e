//! Theme and syntax file parsing
//!
//! Theme files assign color codes to categories:
//! ```text
//! keyword: 1 31
//! string: 33
//! ```
//!
//! Syntax files assign a quoted regex to a category:
//! ```text
//! "\b(if|else|while)\b":keyword
//! "//.*":comment
//! ```
//!
//! Blank lines and lines starting with `#` are ignored in both.

use std::collections::HashMap;

use tracing::debug;

use super::rules::{Rule, RuleSet};
use super::style::ColorCodes;
use crate::error::{HighlightError, Result};

/// Separator between the regex literal and the category name
const SYNTAX_SEPARATOR: &str = "\":";

/// Category to color codes mapping
#[derive(Debug, Clone, Default)]
pub struct Theme {
    colors: HashMap<String, ColorCodes>,
}

impl Theme {
    pub fn get(&self, category: &str) -> Option<&ColorCodes> {
        self.colors.get(category)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }
}

/// One line of a syntax file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxEntry {
    pub category: String,
    pub pattern: String,
    /// 1-based line number in the syntax file
    pub line: usize,
}

fn is_ignored(line: &str) -> bool {
    line.is_empty() || line.starts_with('#')
}

/// Parse theme file contents
pub fn parse_theme(file: &str, contents: &str) -> Result<Theme> {
    let mut theme = Theme::default();

    for (idx, line) in contents.lines().enumerate() {
        let line = line.trim();
        if is_ignored(line) {
            continue;
        }

        let (name, codes) = line
            .split_once(':')
            .ok_or_else(|| HighlightError::parse(file, idx + 1, "expected `category: color ...`"))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(HighlightError::parse(file, idx + 1, "missing category name"));
        }
        let codes = ColorCodes::new(codes.split_whitespace())
            .ok_or_else(|| HighlightError::parse(file, idx + 1, format!("no colors for `{}`", name)))?;

        theme.colors.insert(name.to_string(), codes);
    }

    debug!(file, categories = theme.len(), "parsed theme");
    Ok(theme)
}

/// Parse syntax file contents
///
/// With `strip_spaces` every space on the line is removed before it is
/// split, which is how older syntax files were written. Otherwise spaces
/// inside the regex are kept.
pub fn parse_syntax(file: &str, contents: &str, strip_spaces: bool) -> Result<Vec<SyntaxEntry>> {
    let mut entries = Vec::new();

    for (idx, raw) in contents.lines().enumerate() {
        let stripped;
        let line = if strip_spaces {
            stripped = raw.replace(' ', "");
            stripped.trim()
        } else {
            raw.trim()
        };
        if is_ignored(line) {
            continue;
        }

        let (literal, category) = line
            .rsplit_once(SYNTAX_SEPARATOR)
            .ok_or_else(|| HighlightError::parse(file, idx + 1, "expected `\"regex\":category`"))?;
        let pattern = literal
            .strip_prefix('"')
            .ok_or_else(|| HighlightError::parse(file, idx + 1, "regex must start with `\"`"))?;
        let category = category.trim();
        if category.is_empty() {
            return Err(HighlightError::parse(file, idx + 1, "missing category name"));
        }

        entries.push(SyntaxEntry {
            category: category.to_string(),
            pattern: pattern.to_string(),
            line: idx + 1,
        });
    }

    debug!(file, rules = entries.len(), "parsed syntax");
    Ok(entries)
}

/// Combine a theme and syntax entries into rules, in syntax file order
///
/// Every syntax category must have a theme entry.
pub fn merge(theme: &Theme, entries: &[SyntaxEntry]) -> Result<RuleSet> {
    let mut rules = RuleSet::new();

    for entry in entries {
        let colors = theme
            .get(&entry.category)
            .cloned()
            .ok_or_else(|| HighlightError::UnknownCategory(entry.category.clone()))?;
        rules.push(Rule::new(&entry.category, colors, &entry.pattern)?);
    }

    Ok(rules)
}
