//! SEP classification

use crate::rules::SEP_LABEL;
use crate::types::IssueData;

/// Whether an issue is subject to SEP rules
///
/// True when the title starts with the word `SEP` (case-sensitive) or any
/// label is named exactly `SEP`.
#[must_use]
pub fn is_sep(issue: &IssueData) -> bool {
    title_starts_with_sep(&issue.title) || issue.labels.iter().any(|l| l.name == SEP_LABEL)
}

fn title_starts_with_sep(title: &str) -> bool {
    title.strip_prefix("SEP").is_some_and(|rest| {
        !rest
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
    })
}
