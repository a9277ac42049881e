//! Built-in presets
//!
//! A preset names a theme, a syntax file and a demo source file shipped
//! with hilite. Paths are relative to the configured preset directory.

use std::path::{Path, PathBuf};

use clap::ValueEnum;

/// Files to highlight: theme, syntax definition and source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub theme: PathBuf,
    pub syntax: PathBuf,
    pub source: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Python demo with the default Python theme
    Pysyn,
    /// Python demo with the alternative Python theme
    Pysyn2,
    /// Java demo
    Javasyn,
}

impl Preset {
    fn files(&self) -> (&'static str, &'static str, &'static str) {
        match self {
            Preset::Pysyn => (
                "themes/pythemes/python.theme",
                "themes/pythemes/python.syntax",
                "demofiles/demo.py",
            ),
            Preset::Pysyn2 => (
                "themes/pythemes/python2.theme",
                "themes/pythemes/python2.syntax",
                "demofiles/demo.py",
            ),
            Preset::Javasyn => (
                "themes/javathemes/java.theme",
                "themes/javathemes/java.syntax",
                "demofiles/demo.java",
            ),
        }
    }

    /// Resolve the preset's files against `base`
    pub fn job(&self, base: &Path) -> Job {
        let (theme, syntax, source) = self.files();
        Job {
            theme: base.join(theme),
            syntax: base.join(syntax),
            source: base.join(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_paths() {
        let job = Preset::Javasyn.job(Path::new("/opt/hilite"));
        assert_eq!(job.theme, PathBuf::from("/opt/hilite/themes/javathemes/java.theme"));
        assert_eq!(job.syntax, PathBuf::from("/opt/hilite/themes/javathemes/java.syntax"));
        assert_eq!(job.source, PathBuf::from("/opt/hilite/demofiles/demo.java"));
    }

    #[test]
    fn test_python_presets_share_source() {
        let base = Path::new(".");
        assert_eq!(Preset::Pysyn.job(base).source, Preset::Pysyn2.job(base).source);
        assert_ne!(Preset::Pysyn.job(base).theme, Preset::Pysyn2.job(base).theme);
    }

    #[test]
    fn test_preset_names() {
        assert_eq!(Preset::from_str("pysyn2", false), Ok(Preset::Pysyn2));
        assert!(Preset::from_str("rustsyn", false).is_err());
    }

    #[test]
    fn test_shipped_presets_load() {
        use crate::syntax::{HighlightOptions, Highlighter};

        let base = Path::new(env!("CARGO_MANIFEST_DIR"));
        for preset in Preset::value_variants() {
            let job = preset.job(base);
            let highlighter =
                Highlighter::from_files(&job.theme, &job.syntax, &HighlightOptions::default())
                    .unwrap();
            let source = std::fs::read_to_string(&job.source).unwrap();
            let out = highlighter.highlight(&source).unwrap();
            assert!(out.contains("\x1b["));
        }
    }
}
