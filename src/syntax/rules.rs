//! Highlight rules
//!
//! A rule binds a category name to its color codes and a compiled
//! pattern. Rules live in an ordered [`RuleSet`]; the order is the order
//! in which highlighting passes run.

use std::fmt;

use regex::{Regex, RegexBuilder};
use tracing::warn;

use super::style::ColorCodes;
use crate::error::{HighlightError, Result};

/// Category of syntax element (keyword, string, comment, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Category(String);

impl Category {
    /// String literals, masked while other categories are matched
    pub const STRING: &'static str = "string";
    /// Single-line comments
    pub const COMMENT: &'static str = "comment";
    /// Multi-line comments, matched across newlines
    pub const MLCOMMENT: &'static str = "mlcomment";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn is_string(&self) -> bool {
        self.0 == Self::STRING
    }

    pub fn is_comment(&self) -> bool {
        self.0 == Self::COMMENT
    }

    pub fn is_mlcomment(&self) -> bool {
        self.0 == Self::MLCOMMENT
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A compiled regex pattern
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    /// Whether `.` also matches newlines
    multiline: bool,
}

impl Pattern {
    /// Compile a pattern for the given category
    ///
    /// Multi-line patterns treat newlines as ordinary characters.
    pub fn new(category: &str, source: &str, multiline: bool) -> Result<Self> {
        let regex = RegexBuilder::new(source)
            .dot_matches_new_line(multiline)
            .build()
            .map_err(|source| HighlightError::Regex {
                category: category.to_string(),
                source,
            })?;
        Ok(Self { regex, multiline })
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }
}

/// A single highlight rule
#[derive(Debug, Clone)]
pub struct Rule {
    pub category: Category,
    pub colors: ColorCodes,
    pub pattern: Pattern,
}

impl Rule {
    /// Create a rule, compiling `source` in multi-line mode for `mlcomment`
    pub fn new(category: &str, colors: ColorCodes, source: &str) -> Result<Self> {
        let category = Category::new(category);
        let pattern = Pattern::new(category.name(), source, category.is_mlcomment())?;
        Ok(Self {
            category,
            colors,
            pattern,
        })
    }
}

/// The patterns masked while other categories are matched
#[derive(Debug, Clone)]
pub struct Specials {
    pub string: Pattern,
    pub comment: Pattern,
    pub mlcomment: Pattern,
}

/// Ordered collection of rules, unique by category
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule at the end
    ///
    /// A rule for a category that is already present replaces the old
    /// pattern and colors but keeps its position.
    pub fn push(&mut self, rule: Rule) {
        match self.rules.iter_mut().find(|r| r.category == rule.category) {
            Some(existing) => {
                warn!(category = %rule.category, "category defined twice, using the later pattern");
                *existing = rule;
            }
            None => self.rules.push(rule),
        }
    }

    /// Look up a rule by category name
    pub fn get(&self, category: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.category.name() == category)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Category names in application order
    pub fn categories(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.category.name()).collect()
    }

    /// Extract the string, comment and mlcomment patterns
    pub fn specials(&self) -> Result<Specials> {
        let pattern = |name: &str| {
            self.get(name)
                .map(|r| r.pattern.clone())
                .ok_or_else(|| HighlightError::MissingCategory(name.to_string()))
        };
        Ok(Specials {
            string: pattern(Category::STRING)?,
            comment: pattern(Category::COMMENT)?,
            mlcomment: pattern(Category::MLCOMMENT)?,
        })
    }

    /// Move the named categories to the front, in the given order
    ///
    /// Categories not named keep their relative order after them.
    pub fn reorder<S: AsRef<str>>(&mut self, order: &[S]) -> Result<()> {
        let mut remaining = std::mem::take(&mut self.rules);
        let mut ordered = Vec::with_capacity(remaining.len());

        for name in order {
            let name = name.as_ref();
            match remaining.iter().position(|r| r.category.name() == name) {
                Some(idx) => ordered.push(remaining.remove(idx)),
                None if ordered.iter().any(|r: &Rule| r.category.name() == name) => {}
                None => {
                    // Put everything back before reporting
                    ordered.append(&mut remaining);
                    self.rules = ordered;
                    return Err(HighlightError::UnknownCategory(name.to_string()));
                }
            }
        }

        ordered.append(&mut remaining);
        self.rules = ordered;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(category: &str, source: &str) -> Rule {
        Rule::new(category, ColorCodes::new(["31"]).unwrap(), source).unwrap()
    }

    fn sample_set() -> RuleSet {
        let mut set = RuleSet::new();
        set.push(rule("keyword", r"\bif\b"));
        set.push(rule("string", r#""[^"]*""#));
        set.push(rule("comment", r"//.*"));
        set.push(rule("mlcomment", r"/\*.*?\*/"));
        set
    }

    #[test]
    fn test_category_kinds() {
        assert!(Category::new("string").is_string());
        assert!(Category::new("comment").is_comment());
        assert!(Category::new("mlcomment").is_mlcomment());
        assert!(!Category::new("keyword").is_comment());
    }

    #[test]
    fn test_mlcomment_rule_is_multiline() {
        let ml = rule("mlcomment", r"/\*.*?\*/");
        assert!(ml.pattern.is_multiline());
        assert!(ml.pattern.regex().is_match("/* a\nb */"));

        let comment = rule("comment", r"//.*");
        assert!(!comment.pattern.is_multiline());
        assert_eq!(comment.pattern.regex().find("// a\nb").unwrap().as_str(), "// a");
    }

    #[test]
    fn test_invalid_pattern() {
        let err = Rule::new("number", ColorCodes::new(["36"]).unwrap(), r"(\d+").unwrap_err();
        assert!(matches!(err, HighlightError::Regex { ref category, .. } if category == "number"));
    }

    #[test]
    fn test_push_keeps_position_on_redefinition() {
        let mut set = sample_set();
        set.push(rule("keyword", r"\bwhile\b"));
        assert_eq!(set.categories().len(), 4);
        assert_eq!(set.categories(), vec!["keyword", "string", "comment", "mlcomment"]);
        assert_eq!(set.get("keyword").unwrap().pattern.as_str(), r"\bwhile\b");
    }

    #[test]
    fn test_specials() {
        let specials = sample_set().specials().unwrap();
        assert_eq!(specials.comment.as_str(), r"//.*");
        assert!(specials.mlcomment.is_multiline());
        assert!(!specials.string.is_multiline());
    }

    #[test]
    fn test_specials_missing_category() {
        let mut set = RuleSet::new();
        set.push(rule("string", r#""[^"]*""#));
        set.push(rule("comment", r"//.*"));
        assert!(matches!(
            set.specials(),
            Err(HighlightError::MissingCategory(ref name)) if name == "mlcomment"
        ));
    }

    #[test]
    fn test_reorder() {
        let mut set = sample_set();
        set.reorder(&["mlcomment", "comment"]).unwrap();
        assert_eq!(set.categories(), vec!["mlcomment", "comment", "keyword", "string"]);
    }

    #[test]
    fn test_reorder_unknown_category() {
        let mut set = sample_set();
        let err = set.reorder(&["comment", "number"]).unwrap_err();
        assert!(matches!(err, HighlightError::UnknownCategory(ref name) if name == "number"));
        assert_eq!(set.categories().len(), 4);
    }
}
