//! String utility functions.

use once_cell::sync::Lazy;
use regex::Regex;

static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Strip punctuation and collapse whitespace runs into single spaces.
///
/// Used to normalize chat text before sentiment scoring when the UI is
/// configured to do so. Word characters are Unicode-aware, so accented
/// letters and digits survive.
pub fn normalize_text(text: &str) -> String {
    let without_punct = PUNCTUATION.replace_all(text, "");
    WHITESPACE_RUN
        .replace_all(&without_punct, " ")
        .trim()
        .to_string()
}

/// Truncate to at most `max_chars` characters, appending `...` when cut.
///
/// Operates on `char` boundaries so it never splits a UTF-8 sequence.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text_strips_punctuation() {
        assert_eq!(normalize_text("Hello, world!!"), "Hello world");
    }

    #[test]
    fn test_normalize_text_collapses_whitespace() {
        assert_eq!(normalize_text("  lots   of\t\nspace  "), "lots of space");
    }

    #[test]
    fn test_normalize_text_keeps_unicode_words() {
        assert_eq!(normalize_text("Café au lait?"), "Café au lait");
    }

    #[test]
    fn test_normalize_text_empty() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("?!..."), "");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("abcdef", 3), "abc...");
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo...");
    }
}
