//! Stdio tool server
//!
//! Reads one JSON-RPC message per line, answers on the writer, one line per
//! reply. Messages are handled strictly in order.

use crate::prompts::{prompt_definitions, render_prompt, LintSepsArgs, LINT_SEPS_PROMPT};
use crate::protocol::{
    Request, Response, RpcError, INVALID_REQUEST, PARSE_ERROR, PROTOCOL_VERSION,
};
use crate::tools::{text_result, tool_definitions, LintSepArgs, LINT_SEP_TOOL};
use sep_lint_core::{IssueFetcher, SepLinter};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Name announced on `initialize`
pub const SERVER_NAME: &str = "lint-seps";

#[derive(Debug, Deserialize)]
struct NamedCall {
    name: String,
    #[serde(default)]
    arguments: Value,
}

impl NamedCall {
    fn from_params(params: Value) -> Result<Self, RpcError> {
        serde_json::from_value(params)
            .map_err(|e| RpcError::invalid_params(format!("expected name and arguments: {e}")))
    }
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn encode(response: &Response) -> Option<String> {
    match serde_json::to_string(response) {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::error!("could not serialize reply: {}", e);
            None
        }
    }
}

/// JSON-RPC front end for a [`SepLinter`]
#[derive(Debug)]
pub struct ToolServer<F> {
    linter: SepLinter<F>,
}

impl<F: IssueFetcher> ToolServer<F> {
    /// Create server around a linter
    #[inline]
    #[must_use]
    pub fn new(linter: SepLinter<F>) -> Self {
        Self { linter }
    }

    /// Serve until the reader is exhausted
    ///
    /// Undecodable lines get a parse error reply; only I/O failures end the
    /// session early.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        tracing::info!("{} {} listening on stdio", SERVER_NAME, crate::VERSION);

        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }

            let reply = match std::str::from_utf8(trim_line_ending(&buf)) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.handle_line(line).await,
                Err(e) => {
                    tracing::warn!("discarding line that is not UTF-8: {}", e);
                    encode(&Response::failure(
                        Value::Null,
                        RpcError::new(PARSE_ERROR, format!("parse error: {e}")),
                    ))
                }
            };

            if let Some(reply) = reply {
                writer.write_all(reply.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }

        tracing::info!("input closed, shutting down");
        Ok(())
    }

    /// Handle one raw line; `None` when no reply is due
    pub async fn handle_line(&self, line: &str) -> Option<String> {
        let response = match serde_json::from_str::<Value>(line) {
            Err(e) => Some(Response::failure(
                Value::Null,
                RpcError::new(PARSE_ERROR, format!("parse error: {e}")),
            )),
            Ok(value) => {
                let id = value.get("id").cloned().unwrap_or(Value::Null);
                match serde_json::from_value::<Request>(value) {
                    Ok(request) => self.handle_request(request).await,
                    Err(e) => Some(Response::failure(
                        id,
                        RpcError::new(INVALID_REQUEST, format!("invalid request: {e}")),
                    )),
                }
            }
        }?;

        encode(&response)
    }

    /// Handle one parsed request; `None` for notifications
    pub async fn handle_request(&self, request: Request) -> Option<Response> {
        tracing::debug!(method = %request.method, "request");

        if request.is_notification() {
            tracing::debug!("notification {} ignored", request.method);
            return None;
        }
        let id = request.id.clone().unwrap_or(Value::Null);

        if request.jsonrpc.as_deref() != Some("2.0") {
            return Some(Response::failure(
                id,
                RpcError::new(INVALID_REQUEST, "jsonrpc must be \"2.0\""),
            ));
        }

        Some(match self.dispatch(&request.method, request.params).await {
            Ok(result) => Response::success(id, result),
            Err(error) => {
                tracing::warn!("{} failed: {}", request.method, error);
                Response::failure(id, error)
            }
        })
    }

    async fn dispatch(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        match method {
            "initialize" => Ok(json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": { "tools": {}, "prompts": {} },
                "serverInfo": { "name": SERVER_NAME, "version": crate::VERSION },
            })),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(tool_definitions()),
            "tools/call" => self.call_tool(NamedCall::from_params(params)?).await,
            "prompts/list" => Ok(prompt_definitions()),
            "prompts/get" => {
                let call = NamedCall::from_params(params)?;
                if call.name != LINT_SEPS_PROMPT {
                    return Err(RpcError::invalid_params(format!(
                        "unknown prompt: {}",
                        call.name
                    )));
                }
                render_prompt(&LintSepsArgs::from_value(call.arguments)?)
            }
            other => Err(RpcError::method_not_found(other)),
        }
    }

    async fn call_tool(&self, call: NamedCall) -> Result<Value, RpcError> {
        if call.name != LINT_SEP_TOOL {
            return Err(RpcError::invalid_params(format!("unknown tool: {}", call.name)));
        }

        let issue = LintSepArgs::from_value(call.arguments)?.issue_ref()?;
        let report = self.linter.generate_report(&issue).await;
        Ok(text_result(&report.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{INVALID_PARAMS, METHOD_NOT_FOUND};
    use sep_lint_test_utils::StaticFetcher;

    fn server() -> ToolServer<StaticFetcher> {
        ToolServer::new(SepLinter::new(StaticFetcher::new()))
    }

    async fn call(server: &ToolServer<StaticFetcher>, message: Value) -> Value {
        let reply = server.handle_line(&message.to_string()).await.unwrap();
        serde_json::from_str(&reply).unwrap()
    }

    #[tokio::test]
    async fn initialize_announces_server() {
        let reply = call(
            &server(),
            json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {} }),
        )
        .await;
        assert_eq!(reply["id"], 1);
        assert_eq!(reply["result"]["serverInfo"]["name"], SERVER_NAME);
        assert_eq!(reply["result"]["protocolVersion"], PROTOCOL_VERSION);
    }

    #[tokio::test]
    async fn notifications_get_no_reply() {
        let line = json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }).to_string();
        assert!(server().handle_line(&line).await.is_none());
    }

    #[tokio::test]
    async fn null_id_gets_a_reply() {
        let reply = call(&server(), json!({ "jsonrpc": "2.0", "id": null, "method": "ping" })).await;
        assert_eq!(reply["id"], Value::Null);
        assert_eq!(reply["result"], json!({}));
    }

    #[tokio::test]
    async fn parse_error() {
        let reply = server().handle_line("{not json").await.unwrap();
        let reply: Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(reply["error"]["code"], PARSE_ERROR);
        assert_eq!(reply["id"], Value::Null);
    }

    #[tokio::test]
    async fn invalid_request() {
        let reply = call(&server(), json!({ "jsonrpc": "2.0", "id": 4 })).await;
        assert_eq!(reply["error"]["code"], INVALID_REQUEST);
        assert_eq!(reply["id"], 4);

        let reply = call(&server(), json!({ "jsonrpc": "1.0", "id": 5, "method": "ping" })).await;
        assert_eq!(reply["error"]["code"], INVALID_REQUEST);
    }

    #[tokio::test]
    async fn unknown_method() {
        let reply = call(&server(), json!({ "jsonrpc": "2.0", "id": 2, "method": "resources/list" })).await;
        assert_eq!(reply["error"]["code"], METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_tool() {
        let reply = call(
            &server(),
            json!({
                "jsonrpc": "2.0", "id": 3, "method": "tools/call",
                "params": { "name": "rm_rf", "arguments": {} }
            }),
        )
        .await;
        assert_eq!(reply["error"]["code"], INVALID_PARAMS);
    }

    #[tokio::test]
    async fn tool_call_folds_fetch_failure_into_text() {
        let reply = call(
            &server(),
            json!({
                "jsonrpc": "2.0", "id": 6, "method": "tools/call",
                "params": {
                    "name": LINT_SEP_TOOL,
                    "arguments": { "repository_owner": "owner", "repository_name": "repo", "issue_number": 1 }
                }
            }),
        )
        .await;
        assert_eq!(reply["result"]["isError"], false);
        assert_eq!(
            reply["result"]["content"][0]["text"],
            "Could not fetch data for <github_issue>owner/repo#1</github_issue> due to \
             <error>The server responded with status \"404 Not Found\"</error>."
        );
    }
}
