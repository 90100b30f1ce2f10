//! SEP Lint host
//!
//! Exposes the linter to agents over a line-delimited JSON-RPC stdio
//! protocol (one `lint_sep` tool, one `lint_seps` prompt) and to humans via
//! the `sep-lint check` command.

#![warn(unreachable_pub)]

pub mod prompts;
pub mod protocol;
pub mod server;
pub mod telemetry;
pub mod tools;

pub use server::{ToolServer, SERVER_NAME};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
