//! Error types for SEP Lint
//!
//! Provides error handling for:
//! - Fetch operations (issue reference → issue data)
//! - Parsing textual issue references
//! - Loading configuration

use std::path::PathBuf;

/// Errors while retrieving an issue
///
/// The display text of every variant is the human-readable message that ends
/// up inside the `<error>` tag of a fetch-failure report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Remote service answered with a non-success status
    #[error("The server responded with status \"{status} {reason}\"")]
    Status {
        /// Numeric HTTP status code
        status: u16,
        /// Status text (canonical reason phrase)
        reason: String,
    },

    /// Request never produced a response (DNS, connect, TLS, timeout, ...)
    #[error("{0}")]
    Transport(String),

    /// Response body is not a decodable issue
    #[error("malformed issue data: {0}")]
    Decode(String),
}

impl FetchError {
    /// Create status error from code and reason phrase
    pub fn status(status: u16, reason: impl Into<String>) -> Self {
        Self::Status {
            status,
            reason: reason.into(),
        }
    }

    /// Create transport error from any displayable fault
    pub fn transport(fault: impl std::fmt::Display) -> Self {
        Self::Transport(fault.to_string())
    }
}

/// Errors while parsing `owner/repo#number`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IssueRefError {
    /// Text does not have the `owner/repo#number` shape
    #[error("expected 'owner/repo#number', got '{0}'")]
    Malformed(String),

    /// Owner or repository segment is empty
    #[error("owner and repository must not be empty")]
    EmptySegment,

    /// Issue number is zero or not a number
    #[error("issue number must be a positive integer, got '{0}'")]
    InvalidNumber(String),
}

/// Errors while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error during config file read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for `LintConfig`
    #[error("invalid config file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A single setting has an unusable value
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create invalid value error for a setting
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}
