//! Linter configuration
//!
//! Settings are layered: defaults, then an optional TOML file, then
//! environment variables. Callers (the CLI) apply their own overrides last
//! through the `with_*` builders.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default GitHub REST API root
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Environment variable overriding the API root
pub const ENV_API_URL: &str = "SEP_LINT_API_URL";
/// Environment variable overriding the user agent
pub const ENV_USER_AGENT: &str = "SEP_LINT_USER_AGENT";
/// Environment variable overriding the request timeout (seconds)
pub const ENV_TIMEOUT_SECS: &str = "SEP_LINT_TIMEOUT_SECS";
/// Environment variable holding the API token
pub const ENV_TOKEN: &str = "GITHUB_TOKEN";

/// Configuration for fetching issues
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// API root, without trailing slash
    pub api_base_url: String,
    /// `User-Agent` header (required by the GitHub API)
    pub user_agent: String,
    /// Optional bearer token
    pub token: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            user_agent: format!("sep-lint/{}", crate::VERSION),
            token: None,
            timeout_secs: 30,
        }
    }
}

impl std::fmt::Debug for LintConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LintConfig")
            .field("api_base_url", &self.api_base_url)
            .field("user_agent", &self.user_agent)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl LintConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new().with_env_vars(|key| std::env::var(key).ok())
    }

    /// Load a TOML file; missing keys keep their defaults
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()
    }

    /// Apply overrides from an environment lookup
    pub fn with_env_vars<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_base_url = url;
        }
        if let Some(agent) = lookup(ENV_USER_AGENT) {
            self.user_agent = agent;
        }
        if let Some(token) = lookup(ENV_TOKEN).filter(|t| !t.is_empty()) {
            self.token = Some(token);
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = secs
                .parse()
                .map_err(|_| ConfigError::invalid_value(ENV_TIMEOUT_SECS, format!("'{secs}' is not a number")))?;
        }
        self.validate()
    }

    /// With API root
    #[inline]
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// With bearer token
    #[inline]
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// With request timeout
    #[inline]
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Request timeout as a duration
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check settings and normalize the API root
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        let trimmed = self.api_base_url.trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::invalid_value(
                "api_base_url",
                format!("'{}' is not an http(s) URL", self.api_base_url),
            ));
        }
        self.api_base_url = trimmed.to_string();

        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::invalid_value("user_agent", "must not be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid_value(
                "timeout_secs",
                "must be greater than zero",
            ));
        }
        Ok(self)
    }
}
