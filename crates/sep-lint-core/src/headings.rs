//! Heading extraction from issue bodies
//!
//! Recognizes two heading forms in a single left-to-right scan:
//! - ATX lines: `## Title` (leading `#`s, text trimmed of spaces)
//! - HTML elements: `<h2>Title</h2>` (case-insensitive, same level on both tags)
//!
//! Matches never overlap; at a given position the ATX form wins.

use once_cell::sync::Lazy;
use regex::Regex;

/// `regex` has no backreferences, so each heading level gets its own
/// alternative to keep opening and closing tags on the same level.
static HEADING_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let html_levels = (1..=6)
        .map(|level| format!(r"<h{level}>\s*(.+?)\s*</h{level}>"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?imR)^#+[ ]*(.+?)[ ]*$|{html_levels}"))
        .expect("heading pattern is valid")
});

/// Extract heading titles in document order
///
/// Duplicates are kept.
#[must_use]
pub fn extract_headings(text: &str) -> Vec<String> {
    HEADING_PATTERN
        .captures_iter(text)
        .filter_map(|caps| {
            caps.iter()
                .skip(1)
                .find_map(|group| group.map(|m| m.as_str().to_string()))
        })
        .collect()
}
