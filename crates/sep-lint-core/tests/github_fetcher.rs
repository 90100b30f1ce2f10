//! GithubFetcher against a local HTTP server
//!
//! Every way a request can go wrong must come back as a `FetchError`, and the
//! linter must turn that into a fetch-failure report.

use sep_lint_core::{FetchError, GithubFetcher, IssueFetcher, IssueRef, LintConfig, SepLinter};
use sep_lint_test_utils::{github_issue_json, CONFORMANT_BODY};
use std::net::SocketAddr;
use warp::http::StatusCode;
use warp::{Filter, Reply};

fn routes() -> impl Filter<Extract = (warp::reply::Response,), Error = warp::Rejection> + Clone {
    warp::path!("repos" / String / String / "issues" / u64)
        .and(warp::header::optional::<String>("authorization"))
        .and(warp::header::optional::<String>("user-agent"))
        .map(
            |_owner: String, _repo: String, number: u64, auth: Option<String>, agent: Option<String>| {
                match number {
                    7 => warp::reply::json(&github_issue_json(
                        7,
                        "SEP-7: Example",
                        &["SEP", "draft"],
                        Some(CONFORMANT_BODY),
                    ))
                    .into_response(),
                    8 => warp::reply::with_status("not json", StatusCode::OK).into_response(),
                    9 if auth.as_deref() == Some("Bearer secret") => {
                        warp::reply::json(&github_issue_json(9, "Private", &[], None)).into_response()
                    }
                    9 => warp::reply::with_status("", StatusCode::UNAUTHORIZED).into_response(),
                    10 if agent.as_deref().is_some_and(|a| a.starts_with("sep-lint/")) => {
                        warp::reply::json(&github_issue_json(10, "Agent", &[], Some(""))).into_response()
                    }
                    10 => warp::reply::with_status("", StatusCode::FORBIDDEN).into_response(),
                    11 => warp::reply::with_status("", StatusCode::from_u16(599).unwrap())
                        .into_response(),
                    _ => warp::reply::with_status("", StatusCode::NOT_FOUND).into_response(),
                }
            },
        )
}

fn start_server() -> SocketAddr {
    let (addr, server) = warp::serve(routes()).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    addr
}

fn fetcher_for(addr: SocketAddr, token: Option<&str>) -> GithubFetcher {
    let mut config = LintConfig::new().with_api_base_url(format!("http://{addr}"));
    if let Some(token) = token {
        config = config.with_token(token);
    }
    GithubFetcher::new(&config).unwrap()
}

#[tokio::test]
async fn fetches_and_decodes_issue() {
    let fetcher = fetcher_for(start_server(), None);

    let data = fetcher
        .fetch_issue(&IssueRef::new("acme", "widgets", 7))
        .await
        .unwrap();
    assert_eq!(data.title, "SEP-7: Example");
    assert_eq!(data.label_names(), vec!["SEP", "draft"]);
    assert_eq!(data.extra["state"], "open");
}

#[tokio::test]
async fn sends_user_agent() {
    let fetcher = fetcher_for(start_server(), None);

    let data = fetcher
        .fetch_issue(&IssueRef::new("acme", "widgets", 10))
        .await
        .unwrap();
    assert_eq!(data.title, "Agent");
}

#[tokio::test]
async fn not_found_status() {
    let fetcher = fetcher_for(start_server(), None);

    let err = fetcher
        .fetch_issue(&IssueRef::new("owner", "repo", 1))
        .await
        .unwrap_err();
    assert_eq!(err, FetchError::status(404, "Not Found"));
}

#[tokio::test]
async fn nonstandard_status_has_reason_placeholder() {
    let fetcher = fetcher_for(start_server(), None);

    let err = fetcher
        .fetch_issue(&IssueRef::new("acme", "widgets", 11))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "The server responded with status \"599 Unknown\""
    );
}

#[tokio::test]
async fn token_is_sent_as_bearer() {
    let addr = start_server();
    let issue = IssueRef::new("acme", "widgets", 9);

    let err = fetcher_for(addr, None).fetch_issue(&issue).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "The server responded with status \"401 Unauthorized\""
    );

    let data = fetcher_for(addr, Some("secret")).fetch_issue(&issue).await.unwrap();
    assert_eq!(data.title, "Private");
    assert_eq!(data.body, "");
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let fetcher = fetcher_for(start_server(), None);

    let err = fetcher
        .fetch_issue(&IssueRef::new("acme", "widgets", 8))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn refused_connection_is_transport_error() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let fetcher = fetcher_for(addr, None);

    let err = fetcher
        .fetch_issue(&IssueRef::new("acme", "widgets", 7))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
}

#[tokio::test]
async fn linter_reports_http_failure() {
    let linter = SepLinter::new(fetcher_for(start_server(), None));

    let report = linter
        .generate_report(&IssueRef::new("owner", "repo", 1))
        .await;
    assert_eq!(
        report.to_string(),
        "Could not fetch data for <github_issue>owner/repo#1</github_issue> due to \
         <error>The server responded with status \"404 Not Found\"</error>."
    );
}

#[tokio::test]
async fn linter_reports_conformant_issue_over_http() {
    let linter = SepLinter::new(fetcher_for(start_server(), None));

    let report = linter
        .generate_report(&IssueRef::new("acme", "widgets", 7))
        .await;
    assert_eq!(
        report.to_string(),
        "<github_issue>acme/widgets#7</github_issue> is OK."
    );
}
