//! Prompts advertised to agents
//!
//! The instructions are bundled text handed over verbatim; only the target
//! repository and optional `since` filter are appended.

use crate::protocol::RpcError;
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use serde_json::{json, Value};

/// Name of the SEP review prompt
pub const LINT_SEPS_PROMPT: &str = "lint_seps";

const INSTRUCTIONS: &str = include_str!("../prompts/lint_seps.md");

/// Arguments of the `lint_seps` prompt
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LintSepsArgs {
    /// Target repository as `owner/repo`
    pub repository: String,
    /// Only issues updated at or after this RFC 3339 timestamp
    #[serde(default)]
    pub since: Option<String>,
}

impl LintSepsArgs {
    /// Parse prompt arguments
    pub fn from_value(arguments: Value) -> Result<Self, RpcError> {
        serde_json::from_value(arguments).map_err(|e| {
            RpcError::invalid_params(format!("invalid {LINT_SEPS_PROMPT} arguments: {e}"))
        })
    }

    fn validate(&self) -> Result<Option<DateTime<FixedOffset>>, RpcError> {
        let valid_repo = self
            .repository
            .split_once('/')
            .is_some_and(|(owner, repo)| {
                !owner.is_empty() && !repo.is_empty() && !repo.contains('/')
            });
        if !valid_repo {
            return Err(RpcError::invalid_params(format!(
                "repository must be 'owner/repo', got '{}'",
                self.repository
            )));
        }

        self.since
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| {
                DateTime::parse_from_rfc3339(s).map_err(|e| {
                    RpcError::invalid_params(format!("since must be an RFC 3339 timestamp: {e}"))
                })
            })
            .transpose()
    }
}

/// `prompts/list` payload
#[must_use]
pub fn prompt_definitions() -> Value {
    json!({
        "prompts": [{
            "name": LINT_SEPS_PROMPT,
            "description": "Review the SEP issues of a repository and report what needs fixing.",
            "arguments": [
                {
                    "name": "repository",
                    "description": "Repository to review, as owner/repo",
                    "required": true
                },
                {
                    "name": "since",
                    "description": "Only issues updated since this RFC 3339 timestamp",
                    "required": false
                }
            ]
        }]
    })
}

/// `prompts/get` payload
pub fn render_prompt(args: &LintSepsArgs) -> Result<Value, RpcError> {
    let since = args.validate()?;

    let mut text = format!("{}\n\nRepository: {}\n", INSTRUCTIONS.trim_end(), args.repository);
    if let Some(since) = since {
        text.push_str(&format!(
            "Only consider issues updated since {}.\n",
            since.to_rfc3339()
        ));
    }

    Ok(json!({
        "description": format!("Review SEP issues in {}", args.repository),
        "messages": [{
            "role": "user",
            "content": { "type": "text", "text": text }
        }]
    }))
}
