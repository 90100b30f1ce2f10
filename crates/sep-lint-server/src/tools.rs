//! Tools advertised to agents

use crate::protocol::RpcError;
use schemars::JsonSchema;
use sep_lint_core::IssueRef;
use serde::Deserialize;
use serde_json::{json, Value};

/// Name of the SEP lint tool
pub const LINT_SEP_TOOL: &str = "lint_sep";

/// Arguments of the `lint_sep` tool
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct LintSepArgs {
    /// Owner of the repository (user or organization)
    pub repository_owner: String,
    /// Name of the repository
    pub repository_name: String,
    /// Number of the issue to check
    #[schemars(range(min = 1))]
    pub issue_number: u64,
}

impl LintSepArgs {
    /// Parse tool arguments
    pub fn from_value(arguments: Value) -> Result<Self, RpcError> {
        serde_json::from_value(arguments)
            .map_err(|e| RpcError::invalid_params(format!("invalid {LINT_SEP_TOOL} arguments: {e}")))
    }

    /// Validated issue reference
    pub fn issue_ref(&self) -> Result<IssueRef, RpcError> {
        if self.repository_owner.trim().is_empty() || self.repository_name.trim().is_empty() {
            return Err(RpcError::invalid_params(
                "repository_owner and repository_name must not be empty",
            ));
        }
        if self.issue_number == 0 {
            return Err(RpcError::invalid_params("issue_number must be at least 1"));
        }
        Ok(IssueRef::new(
            self.repository_owner.trim(),
            self.repository_name.trim(),
            self.issue_number,
        ))
    }
}

/// `tools/list` payload
#[must_use]
pub fn tool_definitions() -> Value {
    let schema = schemars::schema_for!(LintSepArgs);
    json!({
        "tools": [{
            "name": LINT_SEP_TOOL,
            "description": "Check a GitHub issue against the SEP conventions (title prefix, \
                            state and SEP labels, required sections) and report what to fix.",
            "inputSchema": schema,
        }]
    })
}

/// `tools/call` payload for a finished report
#[must_use]
pub fn text_result(text: &str) -> Value {
    json!({
        "content": [{ "type": "text", "text": text }],
        "isError": false,
    })
}
