//! Configuration file support
//!
//! Loads settings from ~/.hilite.toml (or %USERPROFILE%\.hilite.toml on
//! Windows). `HILITE_CONFIG` overrides the location and must name an
//! existing file.
//!
//! Example:
//! ```toml
//! # hilite configuration
//! order = ["mlcomment", "comment", "string"]
//! preset-dir = "/usr/share/hilite"
//! strip-syntax-spaces = false
//! color = "auto"
//! ```

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use toml::{Table, Value};
use tracing::debug;

use crate::error::{HighlightError, Result};
use crate::syntax::{ColorMode, HighlightOptions};

/// Configuration settings
#[derive(Debug, Clone)]
pub struct Config {
    /// Categories to apply first, in this order
    pub order: Vec<String>,
    /// Directory that preset paths are relative to
    pub preset_dir: PathBuf,
    /// Remove spaces from syntax file lines (older syntax files)
    pub strip_syntax_spaces: bool,
    /// When to emit color escapes
    pub color: ColorMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            preset_dir: PathBuf::from("."),
            strip_syntax_spaces: false,
            color: ColorMode::Always,
        }
    }
}

impl Config {
    /// Config path named by `HILITE_CONFIG`, which must exist
    fn explicit_path() -> Option<PathBuf> {
        env::var_os("HILITE_CONFIG").map(PathBuf::from)
    }

    /// Default config file path
    fn default_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".hilite.toml"))
        }

        #[cfg(not(windows))]
        {
            env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".hilite.toml"))
        }
    }

    /// Load configuration
    ///
    /// A missing default file yields the defaults; a missing file named by
    /// `HILITE_CONFIG` is an error.
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::explicit_path() {
            return Self::load_from(&path, true);
        }
        match Self::default_path() {
            Some(path) => Self::load_from(&path, false),
            None => Ok(Config::default()),
        }
    }

    /// Load configuration from `path`
    fn load_from(path: &Path, required: bool) -> Result<Self> {
        let mut config = Config::default();

        match fs::read_to_string(path) {
            Ok(contents) => {
                let settings = Self::parse(&contents)?;
                config.apply(&settings)?;
                debug!(path = %path.display(), "loaded config");
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound && !required => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(HighlightError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            Err(e) => return Err(e.into()),
        }

        Ok(config)
    }

    /// Parse config file contents into a table
    fn parse(contents: &str) -> Result<Table> {
        contents
            .parse::<Table>()
            .map_err(|e| HighlightError::Config(e.to_string()))
    }

    /// Apply settings from a parsed config
    fn apply(&mut self, settings: &Table) -> Result<()> {
        if let Some(value) = settings.get("order") {
            self.order = value
                .as_array()
                .ok_or_else(|| invalid("order", "an array of category names"))?
                .iter()
                .map(|v| {
                    v.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| invalid("order", "an array of category names"))
                })
                .collect::<Result<_>>()?;
        }

        if let Some(value) = settings.get("preset-dir") {
            let dir = value.as_str().ok_or_else(|| invalid("preset-dir", "a path"))?;
            self.preset_dir = PathBuf::from(dir);
        }

        if let Some(value) = settings.get("strip-syntax-spaces") {
            self.strip_syntax_spaces = parse_bool(value)
                .ok_or_else(|| invalid("strip-syntax-spaces", "a boolean"))?;
        }

        if let Some(value) = settings.get("color") {
            self.color = value
                .as_str()
                .and_then(ColorMode::from_name)
                .ok_or_else(|| invalid("color", "\"always\", \"auto\" or \"never\""))?;
        }

        Ok(())
    }

    /// Options for loading highlight rules
    pub fn highlight_options(&self) -> HighlightOptions {
        HighlightOptions {
            order: self.order.clone(),
            strip_syntax_spaces: self.strip_syntax_spaces,
        }
    }
}

fn invalid(key: &str, expected: &str) -> HighlightError {
    HighlightError::Config(format!("`{}` must be {}", key, expected))
}

/// Parse a boolean value, accepting the usual string spellings too
fn parse_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Boolean(b) => Some(*b),
        Value::String(s) => match s.to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
