//! SEP Lint Core
//!
//! Checks a single GitHub issue against the conventions of a Structured
//! Enhancement Proposal (SEP) and renders a human-readable compliance report.
//!
//! # Pipeline
//!
//! ```text
//! IssueRef → IssueFetcher → IssueData → is_sep? ─no──→ Report::NotSep
//!                 │                        │
//!                 └─ FetchError            yes
//!                        │                 ↓
//!                        │     RuleSet (title, labels, sections)
//!                        │                 ↓
//!                        └──→ Report::{FetchFailed, Ok, Problems}
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use sep_lint_core::{GithubFetcher, IssueRef, LintConfig, SepLinter};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = GithubFetcher::new(&LintConfig::from_env()?)?;
//! let linter = SepLinter::new(fetcher);
//!
//! let report = linter.generate_report(&IssueRef::new("acme", "widgets", 7)).await;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod classify;
pub mod config;
pub mod error;
pub mod fetch;
pub mod headings;
pub mod linter;
pub mod report;
pub mod rules;
pub mod types;

// Re-exports for convenience
pub use classify::is_sep;
pub use config::LintConfig;
pub use error::{ConfigError, FetchError, IssueRefError};
pub use fetch::{GithubFetcher, IssueFetcher};
pub use headings::extract_headings;
pub use linter::SepLinter;
pub use report::{Problem, Report};
pub use rules::{LabelRule, Rule, RuleSet, SectionRule, TitleRule};
pub use types::{IssueData, IssueRef, Label};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with SEP Lint
    pub use crate::config::LintConfig;
    pub use crate::error::FetchError;
    pub use crate::fetch::{GithubFetcher, IssueFetcher};
    pub use crate::linter::SepLinter;
    pub use crate::report::Report;
    pub use crate::types::{IssueData, IssueRef, Label};
}
