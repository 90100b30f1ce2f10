//! Testing utilities for SEP Lint workspace
//!
//! Shared fixtures and a canned fetcher.

#![allow(missing_docs)]

use async_trait::async_trait;
use sep_lint_core::{FetchError, IssueData, IssueFetcher, IssueRef};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Body containing every required section as an ATX heading
pub const CONFORMANT_BODY: &str = "## Preamble\n\nAuthor: someone\n\n\
## Abstract\n\nShort summary.\n\n\
## Motivation\n\nWhy.\n\n\
## Specification\n\nWhat.\n\n\
## Rationale\n\nBecause.\n";

pub fn issue_ref(number: u64) -> IssueRef {
    IssueRef::new("acme", "widgets", number)
}

pub fn create_issue(title: &str, labels: &[&str], body: &str) -> IssueData {
    IssueData::new(title, body, labels.iter().copied())
}

pub fn create_conformant_sep(number: u64) -> IssueData {
    create_issue(&format!("SEP-{number}: Example"), &["SEP", "draft"], CONFORMANT_BODY)
}

/// Issue JSON shaped like a GitHub API response, including fields the
/// linter ignores
pub fn github_issue_json(number: u64, title: &str, labels: &[&str], body: Option<&str>) -> Value {
    let labels: Vec<Value> = labels
        .iter()
        .enumerate()
        .map(|(i, name)| {
            json!({
                "id": 1000 + i,
                "name": name,
                "color": "ededed",
                "default": false
            })
        })
        .collect();

    json!({
        "number": number,
        "title": title,
        "body": body,
        "state": "open",
        "labels": labels,
        "user": { "login": "someone" },
        "html_url": format!("https://github.com/acme/widgets/issues/{number}")
    })
}

/// Fetcher answering from a fixed table; unknown issues are 404s
#[derive(Debug, Default)]
pub struct StaticFetcher {
    responses: HashMap<IssueRef, Result<IssueData, FetchError>>,
    calls: AtomicUsize,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_issue(mut self, issue: IssueRef, data: IssueData) -> Self {
        self.responses.insert(issue, Ok(data));
        self
    }

    pub fn with_error(mut self, issue: IssueRef, error: FetchError) -> Self {
        self.responses.insert(issue, Err(error));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IssueFetcher for StaticFetcher {
    async fn fetch_issue(&self, issue: &IssueRef) -> Result<IssueData, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .get(issue)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::status(404, "Not Found")))
    }
}
