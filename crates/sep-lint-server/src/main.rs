//! `sep-lint` command line
//!
//! `check` prints the report for one issue; `serve` runs the stdio tool server.

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use sep_lint_core::{GithubFetcher, IssueRef, LintConfig, SepLinter};
use sep_lint_server::telemetry::{self, LogFormat};
use sep_lint_server::ToolServer;
use std::path::PathBuf;

fn cli() -> Command {
    Command::new("sep-lint")
        .version(sep_lint_server::VERSION)
        .about("Check GitHub issues against the Structured Enhancement Proposal conventions")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .global(true)
                .help("GitHub API root (default https://api.github.com)"),
        )
        .arg(
            Arg::new("token")
                .long("token")
                .global(true)
                .help("GitHub token (default: $GITHUB_TOKEN)"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .global(true)
                .value_parser(value_parser!(u64))
                .help("Request timeout in seconds"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .default_value("info")
                .help("Log filter when RUST_LOG is unset"),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .global(true)
                .default_value("text")
                .value_parser(value_parser!(LogFormat))
                .help("Log format: text or json"),
        )
        .subcommand(
            Command::new("check")
                .about("Check one issue and print the report")
                .arg(
                    Arg::new("issue")
                        .value_parser(value_parser!(IssueRef))
                        .conflicts_with_all(["owner", "repo", "number"])
                        .required_unless_present_all(["owner", "repo", "number"])
                        .help("Issue as owner/repo#number"),
                )
                .arg(Arg::new("owner").long("owner").requires_all(["repo", "number"]).help("Repository owner"))
                .arg(Arg::new("repo").long("repo").requires_all(["owner", "number"]).help("Repository name"))
                .arg(
                    Arg::new("number")
                        .long("number")
                        .requires_all(["owner", "repo"])
                        .value_parser(value_parser!(u64).range(1..))
                        .help("Issue number"),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .action(ArgAction::SetTrue)
                        .help("Exit with status 1 unless the issue is OK"),
                ),
        )
        .subcommand(Command::new("serve").about("Run the stdio tool server for agents"))
}

fn load_config(args: &ArgMatches) -> anyhow::Result<LintConfig> {
    let base = match args.get_one::<PathBuf>("config") {
        Some(path) => LintConfig::from_toml_file(path)?,
        None => LintConfig::new(),
    };
    let mut config = base.with_env_vars(|key| std::env::var(key).ok())?;

    if let Some(url) = args.get_one::<String>("api-url") {
        config = config.with_api_base_url(url);
    }
    if let Some(token) = args.get_one::<String>("token") {
        config = config.with_token(token);
    }
    if let Some(secs) = args.get_one::<u64>("timeout") {
        config = config.with_timeout_secs(*secs);
    }
    Ok(config.validate()?)
}

fn issue_from_args(args: &ArgMatches) -> anyhow::Result<IssueRef> {
    if let Some(issue) = args.get_one::<IssueRef>("issue") {
        return Ok(issue.clone());
    }
    let owner = args.get_one::<String>("owner").context("missing --owner")?;
    let repo = args.get_one::<String>("repo").context("missing --repo")?;
    let number = args.get_one::<u64>("number").context("missing --number")?;
    Ok(IssueRef::new(owner, repo, *number))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    // Global flags are propagated down, so the subcommand sees them wherever they were given.
    let Some((command, args)) = matches.subcommand() else {
        unreachable!("subcommand_required");
    };

    let level = args
        .get_one::<String>("log-level")
        .map_or("info", String::as_str);
    let format = args
        .get_one::<LogFormat>("log-format")
        .copied()
        .unwrap_or(LogFormat::Text);
    telemetry::init(level, format)?;

    let config = load_config(args).context("invalid configuration")?;
    tracing::debug!(?config, "configuration loaded");
    let linter = SepLinter::new(GithubFetcher::new(&config)?);

    match command {
        "check" => {
            let issue = issue_from_args(args)?;
            let report = linter.generate_report(&issue).await;
            println!("{report}");

            if args.get_flag("strict") && !report.is_ok() {
                std::process::exit(1);
            }
        }
        "serve" => {
            let server = ToolServer::new(linter);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            server.serve(stdin, tokio::io::stdout()).await?;
        }
        other => unreachable!("unknown subcommand {other}"),
    }

    Ok(())
}
