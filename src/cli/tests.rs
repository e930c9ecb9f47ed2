//! Tests for cli module

use super::runner::cancel_when;
use super::*;
use crate::error::Error;
use crate::pagination::PageMode;
use crate::types::StringMap;
use clap::Parser;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;
use test_case::test_case;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn runner(args: &[&str]) -> Runner {
    let mut argv = vec!["unpage"];
    argv.extend_from_slice(args);
    Runner::new(Cli::try_parse_from(argv).unwrap())
}

// ============================================================================
// Header Parsing
// ============================================================================

#[test_case("Authorization: Bearer abc", "Authorization", "Bearer abc" ; "simple")]
#[test_case("X-Time:12:30:00", "X-Time", "12:30:00" ; "split on first colon")]
#[test_case("  Accept :  text/plain  ", "Accept", "text/plain" ; "trimmed")]
#[test_case("X-Empty:", "X-Empty", "" ; "empty value")]
fn test_parse_header(input: &str, key: &str, value: &str) {
    assert_eq!(
        parse_header(input).unwrap(),
        (key.to_string(), value.to_string())
    );
}

#[test_case("NoColonHere" ; "no colon")]
#[test_case(": value" ; "empty name")]
fn test_parse_header_invalid(input: &str) {
    let err = parse_header(input).unwrap_err();
    assert!(matches!(err, Error::InvalidHeader { header } if header == input));
}

#[test]
fn test_merge_header_is_case_insensitive() {
    let mut headers = default_headers();
    merge_header(&mut headers, "accept".into(), "text/csv".into());

    assert_eq!(
        headers,
        StringMap::from([("accept".to_string(), "text/csv".to_string())])
    );
}

// ============================================================================
// Argument Parsing
// ============================================================================

#[test]
fn test_cli_flags() {
    let cli = Cli::try_parse_from([
        "unpage",
        "https://api.example.com/items",
        "-H",
        "X-A: 1",
        "--header",
        "X-B: 2",
        "-P",
        "p",
        "-D",
        "data",
        "-N",
        "links.next",
        "-L",
        "links.last",
        "-C",
        "meta.total",
        "-t",
        "30",
        "--rate-limit",
        "4",
        "--pretty",
        "-v",
    ])
    .unwrap();

    assert_eq!(cli.url, "https://api.example.com/items");
    assert_eq!(cli.headers, vec!["X-A: 1", "X-B: 2"]);
    assert_eq!(cli.page_param.as_deref(), Some("p"));
    assert_eq!(cli.data_key.as_deref(), Some("data"));
    assert_eq!(cli.next_key.as_deref(), Some("links.next"));
    assert_eq!(cli.last_key.as_deref(), Some("links.last"));
    assert_eq!(cli.count_key.as_deref(), Some("meta.total"));
    assert_eq!(cli.timeout, Some(30));
    assert_eq!(cli.rate_limit, Some(4));
    assert!(cli.pretty);
    assert!(cli.verbose);
}

#[test]
fn test_cli_requires_url() {
    assert!(Cli::try_parse_from(["unpage"]).is_err());
}

// ============================================================================
// Config Merging
// ============================================================================

#[test]
fn test_load_config_defaults() {
    let config = runner(&["https://example.com"]).load_config().unwrap();
    assert_eq!(config.page_param, "page");
    assert_eq!(config.timeout_secs, 60);
}

#[test]
fn test_flags_override_profile() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "page_param: p\ndata_key: items\ntimeout_secs: 10\nrate_limit: 2").unwrap();
    let path = file.path().to_str().unwrap();

    let config = runner(&["https://example.com", "-c", path, "-D", "data", "-t", "5"])
        .load_config()
        .unwrap();

    assert_eq!(config.page_param, "p");
    assert_eq!(config.data_key.as_deref(), Some("data"));
    assert_eq!(config.timeout_secs, 5);
    assert_eq!(config.rate_limit, Some(2));
}

#[test]
fn test_zero_timeout_flag_rejected() {
    let err = runner(&["https://example.com", "-t", "0"])
        .load_config()
        .unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}

#[test]
fn test_build_headers_precedence() {
    let runner = runner(&["https://example.com", "-H", "X-Token: flag"]);
    let mut config = runner.load_config().unwrap();
    config.headers = StringMap::from([
        ("x-token".to_string(), "file".to_string()),
        ("X-Other".to_string(), "kept".to_string()),
    ]);

    let headers = runner.build_headers(&config).unwrap();

    assert_eq!(headers.len(), 3);
    assert_eq!(headers["Accept"], "application/json");
    assert_eq!(headers["X-Token"], "flag");
    assert_eq!(headers["X-Other"], "kept");
}

#[test]
fn test_build_headers_invalid() {
    let runner = runner(&["https://example.com", "-H", "broken"]);
    let config = runner.load_config().unwrap();
    assert!(matches!(
        runner.build_headers(&config),
        Err(Error::InvalidHeader { .. })
    ));
}

// ============================================================================
// Output
// ============================================================================

#[test]
fn test_render() {
    let entries = vec![json!({"id": 1})];

    let compact = runner(&["https://example.com"]).render(&entries).unwrap();
    assert_eq!(compact, r#"[{"id":1}]"#);

    let pretty = runner(&["https://example.com", "--pretty"])
        .render(&entries)
        .unwrap();
    assert_eq!(pretty, "[\n  {\n    \"id\": 1\n  }\n]");
}

#[test]
fn test_render_empty() {
    let rendered = runner(&["https://example.com"]).render(&Vec::new()).unwrap();
    assert_eq!(rendered, "[]");
}

// ============================================================================
// Fetch
// ============================================================================

#[tokio::test]
async fn test_fetch_sends_headers_and_pages() {
    let server = MockServer::start().await;
    for (page, id) in [("1", 1), ("2", 2)] {
        Mock::given(method("GET"))
            .and(query_param("page", page))
            .and(header("Accept", "application/json"))
            .and(header("X-Token", "abc"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"data": [{"id": id}], "total": 2})),
            )
            .expect(1)
            .mount(&server)
            .await;
    }

    let url = format!("{}/items", server.uri());
    let (entries, stats) = runner(&[url.as_str(), "-H", "X-Token: abc", "-D", "data", "-C", "total"])
        .fetch(CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(entries, vec![json!({"id": 1}), json!({"id": 2})]);
    assert_eq!(stats.mode, PageMode::Count { total_pages: 2 });
}

#[tokio::test]
async fn test_fetch_invalid_url() {
    let err = runner(&["not a url"])
        .fetch(CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidUrl(_)));
}

// ============================================================================
// Signal Handling
// ============================================================================

#[tokio::test]
async fn test_signal_cancels_run() {
    let token = CancellationToken::new();
    cancel_when(token.clone(), async { Ok(()) }).await;
    assert!(token.is_cancelled());
}

#[tokio::test]
async fn test_signal_setup_failure_does_not_cancel() {
    let token = CancellationToken::new();
    let failed = async { Err(std::io::Error::other("no signal driver")) };

    let waited =
        tokio::time::timeout(Duration::from_millis(100), cancel_when(token.clone(), failed)).await;

    assert!(waited.is_err());
    assert!(!token.is_cancelled());
}
