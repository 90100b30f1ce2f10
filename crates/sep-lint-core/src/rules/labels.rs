//! Label rule
//!
//! An SEP carries the `SEP` label and exactly one state label. Correction is
//! append-only: existing labels are never removed or reordered.

use super::Rule;
use crate::report::{tag_all, Problem};
use crate::types::{IssueData, IssueRef};

/// Label marking an issue as an SEP
pub const SEP_LABEL: &str = "SEP";

/// Recognized SEP state labels
pub const SEP_STATES: [&str; 9] = [
    "proposal",
    "draft",
    "in-review",
    "accepted",
    "rejected",
    "withdrawn",
    "final",
    "superseded",
    "dormant",
];

/// State appended when an SEP has none
const DEFAULT_STATE: &str = "proposal";

/// Outcome of checking labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCheck {
    /// Whether labels had to be added
    pub needs_correction: bool,
    /// Existing labels followed by any added ones
    pub corrected: Vec<String>,
}

/// Compute the corrected label list
#[must_use]
pub fn check_labels<S: AsRef<str>>(names: &[S]) -> LabelCheck {
    let mut corrected: Vec<String> = names.iter().map(|n| n.as_ref().to_string()).collect();

    if !corrected.iter().any(|n| SEP_STATES.contains(&n.as_str())) {
        corrected.push(DEFAULT_STATE.to_string());
    }
    if !corrected.iter().any(|n| n == SEP_LABEL) {
        corrected.push(SEP_LABEL.to_string());
    }

    LabelCheck {
        needs_correction: corrected.len() > names.len(),
        corrected,
    }
}

/// Rule wrapper around [`check_labels`]
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelRule;

impl Rule for LabelRule {
    fn name(&self) -> &'static str {
        "labels"
    }

    fn check(&self, _issue: &IssueRef, data: &IssueData) -> Option<Problem> {
        let check = check_labels(&data.label_names());
        check.needs_correction.then(|| {
            Problem::new(format!(
                "Labels should be: {}.",
                tag_all("issue_labels", "label", &check.corrected)
            ))
        })
    }
}
