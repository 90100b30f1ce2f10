//! Issue retrieval
//!
//! `IssueFetcher` is the boundary between the linter and the outside world.
//! Implementations fold every failure into a `FetchError`; nothing panics or
//! escapes as a transport-specific error type.

use crate::config::LintConfig;
use crate::error::{ConfigError, FetchError};
use crate::types::{IssueData, IssueRef};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};

/// Source of issue data
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueFetcher: Send + Sync {
    /// Retrieve one issue
    async fn fetch_issue(&self, issue: &IssueRef) -> Result<IssueData, FetchError>;
}

/// Fetcher backed by the GitHub REST API
#[derive(Debug, Clone)]
pub struct GithubFetcher {
    client: reqwest::Client,
    api_base_url: String,
    token: Option<String>,
}

impl GithubFetcher {
    /// Build an HTTP client from configuration
    pub fn new(config: &LintConfig) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static("2022-11-28"),
        );

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| ConfigError::invalid_value("http_client", e.to_string()))?;

        Ok(Self {
            client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// URL of the issue resource
    #[must_use]
    pub fn issue_url(&self, issue: &IssueRef) -> String {
        format!(
            "{}/repos/{}/{}/issues/{}",
            self.api_base_url, issue.owner, issue.repo, issue.number
        )
    }
}

#[async_trait]
impl IssueFetcher for GithubFetcher {
    async fn fetch_issue(&self, issue: &IssueRef) -> Result<IssueData, FetchError> {
        let url = self.issue_url(issue);
        tracing::debug!(%url, "fetching issue");

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(FetchError::transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::status(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
            ));
        }

        response
            .json::<IssueData>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_url_layout() {
        let config = LintConfig::new().with_api_base_url("http://localhost:9000/");
        let fetcher = GithubFetcher::new(&config).unwrap();
        assert_eq!(
            fetcher.issue_url(&IssueRef::new("acme", "widgets", 7)),
            "http://localhost:9000/repos/acme/widgets/issues/7"
        );
    }

    #[test]
    fn default_config_builds_client() {
        let fetcher = GithubFetcher::new(&LintConfig::default()).unwrap();
        assert!(fetcher.issue_url(&IssueRef::new("o", "r", 1)).starts_with("https://api.github.com/"));
    }
}
