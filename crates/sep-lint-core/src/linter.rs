//! SEP linter
//!
//! Ties retrieval, classification, rules and reporting together. This is the
//! entry point hosts call; it always yields a report.

use crate::classify::is_sep;
use crate::fetch::IssueFetcher;
use crate::report::Report;
use crate::rules::RuleSet;
use crate::types::{IssueData, IssueRef};

/// Checks issues fetched through `F`
#[derive(Debug)]
pub struct SepLinter<F> {
    fetcher: F,
    rules: RuleSet,
}

impl<F: IssueFetcher> SepLinter<F> {
    /// Create linter with the standard rule set
    #[inline]
    #[must_use]
    pub fn new(fetcher: F) -> Self {
        Self::with_rules(fetcher, RuleSet::standard())
    }

    /// Create linter with a custom rule set
    #[inline]
    #[must_use]
    pub fn with_rules(fetcher: F, rules: RuleSet) -> Self {
        Self { fetcher, rules }
    }

    /// Fetch and check one issue
    ///
    /// Fetch failures become [`Report::FetchFailed`]; this never errors.
    pub async fn generate_report(&self, issue: &IssueRef) -> Report {
        tracing::info!("Checking {}", issue);

        match self.fetcher.fetch_issue(issue).await {
            Ok(data) => self.check(issue, &data),
            Err(error) => {
                tracing::warn!("Could not fetch {}: {}", issue, error);
                Report::FetchFailed {
                    issue: issue.clone(),
                    error,
                }
            }
        }
    }

    /// Check already retrieved issue data
    #[must_use]
    pub fn check(&self, issue: &IssueRef, data: &IssueData) -> Report {
        if !is_sep(data) {
            tracing::info!("{} is not an SEP", issue);
            return Report::NotSep {
                issue: issue.clone(),
            };
        }

        let problems = self.rules.check_all(issue, data);
        tracing::info!("{} has {} problem(s)", issue, problems.len());
        Report::for_sep(issue.clone(), problems)
    }

    /// Rules in use
    #[inline]
    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Underlying fetcher
    #[inline]
    #[must_use]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }
}
