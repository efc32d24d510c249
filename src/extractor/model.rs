use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Readable content pulled out of a page. Only plain text survives — the
/// pipeline never stores HTML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub title: String,
    pub text: String,
    pub language: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

/// Raw result from the readability pass, before normalization.
#[derive(Debug)]
pub struct ReadableContent {
    pub title: String,
    pub text: String,
}

static SPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());
static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n+").unwrap());

/// Collapse runs of spaces and stacked blank lines while keeping paragraph
/// breaks intact.
pub fn normalize_whitespace(text: &str) -> String {
    let spaced = SPACE_RUN.replace_all(text.trim(), " ");
    BLANK_LINES.replace_all(&spaced, "\n\n").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_space_runs() {
        assert_eq!(normalize_whitespace("a   b\t\tc"), "a b c");
    }

    #[test]
    fn keeps_paragraph_breaks() {
        assert_eq!(
            normalize_whitespace("first paragraph\n\n\n\nsecond paragraph"),
            "first paragraph\n\nsecond paragraph"
        );
    }

    #[test]
    fn trims_edges() {
        assert_eq!(normalize_whitespace("  padded  "), "padded");
    }
}
