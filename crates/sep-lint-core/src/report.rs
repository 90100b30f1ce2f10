//! Report assembly
//!
//! Reports are plain text with lightweight `<name>content</name>` tags so an
//! agent can pick out the issue reference, errors and individual problems.

use crate::error::FetchError;
use crate::types::IssueRef;
use serde::{Deserialize, Serialize};

/// Wrap `content` in a `<name>` tag
#[must_use]
pub fn tag(name: &str, content: &str) -> String {
    format!("<{name}>{content}</{name}>")
}

/// Wrap each item in an `<inner>` tag, space-joined inside an `<outer>` tag
#[must_use]
pub fn tag_all<S: AsRef<str>>(outer: &str, inner: &str, items: &[S]) -> String {
    let tagged = items
        .iter()
        .map(|item| tag(inner, item.as_ref()))
        .collect::<Vec<_>>()
        .join(" ");
    tag(outer, &tagged)
}

fn tag_issue(issue: &IssueRef) -> String {
    tag("github_issue", &issue.to_string())
}

/// One formatted nonconformance description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Problem(String);

impl Problem {
    /// Create problem from its full text
    #[inline]
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Problem text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compliance report for one issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// Issue could not be retrieved
    FetchFailed {
        /// Checked issue
        issue: IssueRef,
        /// Why retrieval failed
        error: FetchError,
    },
    /// Issue is not an SEP; no rules were run
    NotSep {
        /// Checked issue
        issue: IssueRef,
    },
    /// SEP that passes every rule
    Ok {
        /// Checked issue
        issue: IssueRef,
    },
    /// SEP with at least one problem, in rule order
    Problems {
        /// Checked issue
        issue: IssueRef,
        /// Problems found, never empty
        problems: Vec<Problem>,
    },
}

impl Report {
    /// SEP report from collected problems
    ///
    /// An empty problem list is an OK report.
    #[must_use]
    pub fn for_sep(issue: IssueRef, problems: Vec<Problem>) -> Self {
        if problems.is_empty() {
            Self::Ok { issue }
        } else {
            Self::Problems { issue, problems }
        }
    }

    /// Checked issue
    #[must_use]
    pub fn issue(&self) -> &IssueRef {
        match self {
            Self::FetchFailed { issue, .. }
            | Self::NotSep { issue }
            | Self::Ok { issue }
            | Self::Problems { issue, .. } => issue,
        }
    }

    /// Whether the issue needs no changes
    #[inline]
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::NotSep { .. } | Self::Ok { .. })
    }

    /// Problems found (empty unless `Problems`)
    #[must_use]
    pub fn problems(&self) -> &[Problem] {
        match self {
            Self::Problems { problems, .. } => problems,
            _ => &[],
        }
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FetchFailed { issue, error } => write!(
                f,
                "Could not fetch data for {} due to {}.",
                tag_issue(issue),
                tag("error", &error.to_string())
            ),
            Self::NotSep { issue } => write!(f, "{} is OK (not an SEP).", tag_issue(issue)),
            Self::Ok { issue } => write!(f, "{} is OK.", tag_issue(issue)),
            Self::Problems { issue, problems } => {
                let texts: Vec<&str> = problems.iter().map(Problem::as_str).collect();
                write!(
                    f,
                    "{} has the following problems: {}.",
                    tag_issue(issue),
                    tag_all("problems", "problem", &texts)
                )
            }
        }
    }
}
