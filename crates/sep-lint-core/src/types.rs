//! Issue model
//!
//! - `IssueRef`: which issue to check
//! - `IssueData`: the retrieved issue, as far as the rules care
//! - `Label`: one issue label
//!
//! Fields the rules do not read are kept in a side map so records round-trip
//! without loss.

use crate::error::IssueRefError;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Reference to a GitHub issue
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueRef {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Issue number
    pub number: u64,
}

impl IssueRef {
    /// Create new issue reference
    #[inline]
    #[must_use]
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, number: u64) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            number,
        }
    }
}

impl std::fmt::Display for IssueRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

impl FromStr for IssueRef {
    type Err = IssueRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (slug, number) = s
            .rsplit_once('#')
            .ok_or_else(|| IssueRefError::Malformed(s.to_string()))?;
        let (owner, repo) = slug
            .split_once('/')
            .ok_or_else(|| IssueRefError::Malformed(s.to_string()))?;

        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return Err(IssueRefError::EmptySegment);
        }

        let number = number
            .parse::<u64>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| IssueRefError::InvalidNumber(number.to_string()))?;

        Ok(Self::new(owner, repo, number))
    }
}

/// Issue label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// Label name
    pub name: String,
    /// Fields not interpreted by the linter (id, color, ...)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Label {
    /// Create label with only a name
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// Issue as returned by the issues API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueData {
    /// Issue title
    pub title: String,
    /// Issue body; GitHub sends `null` for an empty body
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,
    /// Labels in the order the API lists them
    #[serde(default)]
    pub labels: Vec<Label>,
    /// Fields not interpreted by the linter
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl IssueData {
    /// Create issue data from title, body and label names
    #[must_use]
    pub fn new<I, S>(title: impl Into<String>, body: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            body: body.into(),
            labels: labels.into_iter().map(Label::new).collect(),
            extra: serde_json::Map::new(),
        }
    }

    /// Label names in order
    #[must_use]
    pub fn label_names(&self) -> Vec<&str> {
        self.labels.iter().map(|l| l.name.as_str()).collect()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
