//! Section rule
//!
//! Every SEP body has the required sections as headings. Only presence is
//! checked, by exact name.

use super::Rule;
use crate::headings::extract_headings;
use crate::report::{tag_all, Problem};
use crate::types::{IssueData, IssueRef};

/// Required SEP sections in canonical order
pub const REQUIRED_SECTIONS: [&str; 5] = [
    "Preamble",
    "Abstract",
    "Motivation",
    "Specification",
    "Rationale",
];

/// Required sections absent from `headings`, in canonical order
#[must_use]
pub fn missing_sections<S: AsRef<str>>(headings: &[S]) -> Vec<&'static str> {
    REQUIRED_SECTIONS
        .into_iter()
        .filter(|section| !headings.iter().any(|h| h.as_ref() == *section))
        .collect()
}

/// Rule wrapper around [`missing_sections`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionRule;

impl Rule for SectionRule {
    fn name(&self) -> &'static str {
        "sections"
    }

    fn check(&self, _issue: &IssueRef, data: &IssueData) -> Option<Problem> {
        let missing = missing_sections(&extract_headings(&data.body));
        (!missing.is_empty()).then(|| {
            Problem::new(format!(
                "Sections are missing: {}.",
                tag_all("missing_sections", "section", &missing)
            ))
        })
    }
}
