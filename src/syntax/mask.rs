//! Expression masking
//!
//! Strings and comments may contain text that looks like code. Before a
//! category is matched, those regions are muted: each match is replaced
//! by filler of the same byte length so that offsets into the text stay
//! valid. Unmuting puts the original text back.

use tracing::trace;

use super::rules::Pattern;
use super::span::{splice, Edit, Span};
use crate::error::Result;

/// Filler used for muted regions (ASCII SUB)
///
/// Not a word character, whitespace or quote, so syntax patterns do not
/// match runs of it.
pub const MASK_CHAR: char = '\u{1a}';

/// Text with muted regions and the spans needed to restore them
#[derive(Debug, Clone)]
pub struct Masked {
    pub text: String,
    pub spans: Vec<Span>,
}

impl Masked {
    /// Restore the muted regions
    #[cfg(test)]
    pub fn unmute(self) -> Result<String> {
        unmute(&self.text, &self.spans)
    }
}

/// Mute every non-overlapping match of `pattern` in `text`
pub fn mute(text: &str, pattern: &Pattern) -> Result<Masked> {
    let spans: Vec<Span> = pattern
        .regex()
        .find_iter(text)
        .map(|m| Span::new(m.start(), m.end(), m.as_str()))
        .collect();

    let edits: Vec<Edit> = spans
        .iter()
        .map(|s| Edit::new(s.start, s.end, filler(s.len())))
        .collect();
    let text = splice(text, &edits)?;

    trace!(
        pattern = pattern.as_str(),
        multiline = pattern.is_multiline(),
        muted = spans.len(),
        "muted expression"
    );
    Ok(Masked { text, spans })
}

/// Reinsert the recorded matches at their offsets
pub fn unmute(text: &str, spans: &[Span]) -> Result<String> {
    let edits: Vec<Edit> = spans
        .iter()
        .map(|s| Edit::new(s.start, s.end, s.text.as_str()))
        .collect();
    splice(text, &edits)
}

fn filler(len: usize) -> String {
    std::iter::repeat(MASK_CHAR).take(len).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(source: &str) -> Pattern {
        Pattern::new("test", source, false).unwrap()
    }

    #[test]
    fn test_mute_records_spans() {
        let masked = mute(r#"a = "x"; b = "yz""#, &pattern(r#""[^"]*""#)).unwrap();
        assert_eq!(masked.spans.len(), 2);
        assert_eq!(masked.spans[0], Span::new(4, 7, r#""x""#));
        assert_eq!(masked.spans[1], Span::new(13, 17, r#""yz""#));
        assert!(!masked.text.contains('"'));
        assert!(masked.text.starts_with("a = \u{1a}\u{1a}\u{1a};"));
    }

    #[test]
    fn test_mute_preserves_length() {
        let inputs = [
            "",
            "no matches here",
            "// comment\ncode // another",
            "unicode // ünïcödé ✓\nx",
        ];
        for text in inputs {
            let masked = mute(text, &pattern(r"//.*")).unwrap();
            assert_eq!(masked.text.len(), text.len());
        }
    }

    #[test]
    fn test_round_trip() {
        let cases = [
            ("if x: print('if')  # if", r"'[^']*'"),
            ("if x: print('if')  # if", r"#.*"),
            ("/* a\n * b */ c /* d */", r"/\*.*?\*/"),
            ("héllo wörld", r"[^ ]+"),
            ("aaaa", r"a*"),
            ("", r".*"),
        ];
        for (text, source) in cases {
            let masked = mute(text, &pattern(source)).unwrap();
            assert_eq!(masked.unmute().unwrap(), text);
        }
    }

    #[test]
    fn test_multiline_mute() {
        let text = "x /* one\ntwo */ y";
        let single = mute(text, &Pattern::new("mlcomment", r"/\*.*?\*/", false).unwrap()).unwrap();
        assert!(single.spans.is_empty());

        let multi = mute(text, &Pattern::new("mlcomment", r"/\*.*?\*/", true).unwrap()).unwrap();
        assert_eq!(multi.spans.len(), 1);
        assert_eq!(multi.spans[0].text, "/* one\ntwo */");
        assert!(!multi.text.contains('\n'));
    }

    #[test]
    fn test_muted_text_hides_keywords() {
        let masked = mute(r#"x = "if true""#, &pattern(r#""[^"]*""#)).unwrap();
        assert!(!pattern(r"\bif\b").regex().is_match(&masked.text));
        assert!(!pattern(r"\w+\s*$").regex().is_match(&masked.text));
    }
}
