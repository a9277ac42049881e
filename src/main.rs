//! hilite - print source files with regex-driven ANSI syntax colors
//!
//! Categories (keyword, string, comment, ...) get their colors from a
//! theme file and their patterns from a syntax file.

mod config;
mod error;
mod preset;
mod syntax;

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{CommandFactory, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use config::Config;
use error::{HighlightError, Result};
use preset::{Job, Preset};
use syntax::{read_file, Highlighter};

#[derive(Parser, Debug)]
#[command(name = "hilite", version)]
#[command(about = "Print a source file with syntax colors", long_about = None)]
struct Cli {
    /// Preset name for highlighting
    #[arg(long, value_enum, conflicts_with_all = ["themefile", "syntaxfile", "sourcefile"])]
    preset: Option<Preset>,
    /// *.theme filename
    themefile: Option<String>,
    /// *.syntax filename
    syntaxfile: Option<String>,
    /// Source code to be colored
    sourcefile: Option<String>,
}

impl Cli {
    /// Whether nothing usable was given on the command line
    fn is_empty(&self) -> bool {
        self.preset.is_none()
            && [&self.themefile, &self.syntaxfile, &self.sourcefile]
                .into_iter()
                .all(|arg| arg.as_deref().map_or(true, str::is_empty))
    }

    /// Files to highlight, from the preset or the positional arguments
    fn job(&self, config: &Config) -> Result<Job> {
        if let Some(preset) = self.preset {
            return Ok(preset.job(&config.preset_dir));
        }

        match (&self.themefile, &self.syntaxfile, &self.sourcefile) {
            (Some(theme), Some(syntax), Some(source)) => Ok(Job {
                theme: PathBuf::from(theme),
                syntax: PathBuf::from(syntax),
                source: PathBuf::from(source),
            }),
            _ => Err(HighlightError::Usage(
                "expected THEMEFILE SYNTAXFILE SOURCEFILE or --preset".to_string(),
            )),
        }
    }
}

fn main() {
    init_logging();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("HILITE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if env::args_os().len() == 1 || cli.is_empty() {
        Cli::command().print_help()?;
        process::exit(1);
    }

    let config = Config::load()?;
    let job = cli.job(&config)?;
    debug!(?job, "highlighting");

    let highlighter = Highlighter::from_files(&job.theme, &job.syntax, &config.highlight_options())?;
    let source = read_file(&job.source)?;

    let text = if config.color.enabled() {
        highlighter.highlight(&source)?
    } else {
        source
    };

    write_text(&mut io::stdout().lock(), &text)?;

    Ok(())
}

/// Write the text, ending it with a newline if it has none
fn write_text<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    out.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_positional_job() {
        let cli = Cli::try_parse_from(["hilite", "a.theme", "a.syntax", "a.py"]).unwrap();
        assert!(!cli.is_empty());
        let job = cli.job(&Config::default()).unwrap();
        assert_eq!(job.theme, PathBuf::from("a.theme"));
        assert_eq!(job.syntax, PathBuf::from("a.syntax"));
        assert_eq!(job.source, PathBuf::from("a.py"));
    }

    #[test]
    fn test_preset_job() {
        let cli = Cli::try_parse_from(["hilite", "--preset", "javasyn"]).unwrap();
        let config = Config {
            preset_dir: PathBuf::from("/srv"),
            ..Default::default()
        };
        let job = cli.job(&config).unwrap();
        assert_eq!(job.source, PathBuf::from("/srv/demofiles/demo.java"));
    }

    #[test]
    fn test_empty_arguments() {
        let cli = Cli::try_parse_from(["hilite", "", "", ""]).unwrap();
        assert!(cli.is_empty());
    }

    #[test]
    fn test_partial_arguments() {
        let cli = Cli::try_parse_from(["hilite", "a.theme", "a.syntax"]).unwrap();
        assert!(!cli.is_empty());
        assert!(matches!(cli.job(&Config::default()), Err(HighlightError::Usage(_))));
    }

    #[test]
    fn test_write_text_newline() {
        let mut out = Vec::new();
        write_text(&mut out, "x = 1\n").unwrap();
        assert_eq!(out, b"x = 1\n");

        let mut out = Vec::new();
        write_text(&mut out, "x = 1").unwrap();
        assert_eq!(out, b"x = 1\n");

        let mut out = Vec::new();
        write_text(&mut out, "").unwrap();
        assert_eq!(out, b"\n");
    }

    #[test]
    fn test_preset_conflicts_with_files() {
        assert!(Cli::try_parse_from(["hilite", "--preset", "pysyn", "a.theme"]).is_err());
        assert!(Cli::try_parse_from(["hilite", "--preset", "rustsyn"]).is_err());
    }
}
