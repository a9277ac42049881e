//! Highlight engine
//!
//! Each rule is applied as one pass over the text. A pass mutes
//! multi-line comments, strings and comments (except the category being
//! colored), finds the rule's matches, restores the muted text and then
//! wraps each match in color escapes. Passes run in rule order, each on
//! the output of the previous one.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, trace};

use super::mask::{mute, unmute};
use super::rules::{Pattern, Rule, RuleSet, Specials};
use super::span::{splice, Edit, Span};
use super::theme::{merge, parse_syntax, parse_theme};
use crate::error::{HighlightError, Result};

/// Options that control how rules are loaded
#[derive(Debug, Clone, Default)]
pub struct HighlightOptions {
    /// Categories to apply first, in this order
    pub order: Vec<String>,
    /// Remove all spaces from syntax file lines before parsing
    pub strip_syntax_spaces: bool,
}

/// Read a whole file, reporting a missing file by path
pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => HighlightError::FileNotFound(path.to_path_buf()),
        _ => HighlightError::Io(e),
    })
}

/// Mute `pattern` unless `skip` is set
fn mute_unless(skip: bool, text: String, pattern: &Pattern) -> Result<(String, Vec<Span>)> {
    if skip {
        return Ok((text, Vec::new()));
    }
    let masked = mute(&text, pattern)?;
    Ok((masked.text, masked.spans))
}

/// Apply one rule to `text`
pub fn colorize(text: &str, rule: &Rule, specials: &Specials) -> Result<String> {
    let category = &rule.category;

    let (masked, mlcomments) =
        mute_unless(category.is_mlcomment(), text.to_string(), &specials.mlcomment)?;
    let (masked, strings) = mute_unless(
        category.is_string() || category.is_mlcomment(),
        masked,
        &specials.string,
    )?;
    let (masked, comments) = mute_unless(category.is_comment(), masked, &specials.comment)?;

    let matches: Vec<(usize, usize)> = rule
        .pattern
        .regex()
        .find_iter(&masked)
        .filter(|m| !m.is_empty())
        .map(|m| (m.start(), m.end()))
        .collect();

    // Later mutes may have recorded filler from earlier ones, so restore
    // in reverse order
    let restored = unmute(&masked, &comments)?;
    let restored = unmute(&restored, &strings)?;
    let restored = unmute(&restored, &mlcomments)?;

    let edits: Vec<Edit> = matches
        .into_iter()
        .filter(|&(start, end)| {
            let aligned = restored.is_char_boundary(start) && restored.is_char_boundary(end);
            if !aligned {
                trace!(%category, start, end, "dropping match that splits a character");
            }
            aligned
        })
        .map(|(start, end)| Edit::new(start, end, rule.colors.wrap(&restored[start..end])))
        .collect();

    debug!(%category, matches = edits.len(), "colorized");
    splice(&restored, &edits)
}

/// Applies an ordered set of rules to source text
#[derive(Debug, Clone)]
pub struct Highlighter {
    rules: RuleSet,
    specials: Specials,
}

impl Highlighter {
    /// Create a highlighter; the rules must include string, comment and mlcomment
    pub fn new(rules: RuleSet) -> Result<Self> {
        let specials = rules.specials()?;
        Ok(Self { rules, specials })
    }

    /// Build a highlighter from theme and syntax file contents
    #[cfg(test)]
    pub fn from_sources(theme: &str, syntax: &str, options: &HighlightOptions) -> Result<Self> {
        Self::load("<theme>", theme, "<syntax>", syntax, options)
    }

    /// Build a highlighter from theme and syntax files
    pub fn from_files(theme: &Path, syntax: &Path, options: &HighlightOptions) -> Result<Self> {
        let theme_contents = read_file(theme)?;
        let syntax_contents = read_file(syntax)?;
        Self::load(
            &theme.display().to_string(),
            &theme_contents,
            &syntax.display().to_string(),
            &syntax_contents,
            options,
        )
    }

    fn load(
        theme_name: &str,
        theme: &str,
        syntax_name: &str,
        syntax: &str,
        options: &HighlightOptions,
    ) -> Result<Self> {
        let theme = parse_theme(theme_name, theme)?;
        let entries = parse_syntax(syntax_name, syntax, options.strip_syntax_spaces)?;
        let mut rules = merge(&theme, &entries)?;
        rules.reorder(&options.order)?;
        debug!(order = ?rules.categories(), "loaded rules");
        Self::new(rules)
    }

    #[cfg(test)]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Color `source`, one pass per rule in order
    pub fn highlight(&self, source: &str) -> Result<String> {
        self.rules
            .iter()
            .try_fold(source.to_string(), |text, rule| colorize(&text, rule, &self.specials))
    }
}
