//! ANSI color styling
//!
//! Colors are kept as raw SGR parameter strings exactly as written in the
//! theme file, so any attribute the terminal understands can be used.

use std::io;

use crossterm::tty::IsTty;

/// Escape sequence that resets all attributes
pub const RESET: &str = "\x1b[0m";

/// SGR parameters for one category (e.g. `["1", "31"]` for bold red)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorCodes(Vec<String>);

impl ColorCodes {
    /// Create color codes, returning None if no code is given
    pub fn new<I, S>(codes: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let codes: Vec<String> = codes.into_iter().map(Into::into).collect();
        if codes.is_empty() {
            None
        } else {
            Some(Self(codes))
        }
    }

    #[cfg(test)]
    pub fn codes(&self) -> &[String] {
        &self.0
    }

    /// Escape sequence that switches these attributes on
    ///
    /// All codes are combined into one sequence (`1 31` gives `ESC[1;31m`)
    /// rather than emitting only the first code.
    pub fn open(&self) -> String {
        format!("\x1b[{}m", self.0.join(";"))
    }

    /// Wrap text in the opening sequence and a reset
    pub fn wrap(&self, text: &str) -> String {
        let open = self.open();
        let mut out = String::with_capacity(open.len() + text.len() + RESET.len());
        out.push_str(&open);
        out.push_str(text);
        out.push_str(RESET);
        out
    }
}

/// When to emit color escapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Always,
    /// Only when stdout is a terminal
    Auto,
    Never,
}

impl ColorMode {
    /// Parse a color mode from its config name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "always" => Some(ColorMode::Always),
            "auto" => Some(ColorMode::Auto),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }

    /// Whether output to stdout should be colored
    pub fn enabled(&self) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Auto => io::stdout().is_tty(),
            ColorMode::Never => false,
        }
    }
}
