//! Integration tests for the reachability classifier against a local mock
//! server: outcome taxonomy, redirect resolution and probe idempotence.

use std::time::Duration;

use check_pages::classifier::Classifier;
use check_pages::config::ScannerConfig;
use check_pages::runner::{run_probes, ProbeMethod};
use check_pages::types::{Outcome, Target};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config() -> ScannerConfig {
    let mut config = ScannerConfig::new("someuser");
    config.request_timeout_secs = 1;
    config.inter_request_delay_ms = 0;
    config
}

async fn mock_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("HEAD"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

#[tokio::test]
async fn classify_maps_status_codes() {
    let server = MockServer::start().await;
    mock_status(&server, "/ok", 200).await;
    mock_status(&server, "/missing", 404).await;
    mock_status(&server, "/private", 403).await;
    mock_status(&server, "/broken", 503).await;

    let classifier = Classifier::new(&test_config()).unwrap();

    let ok = classifier
        .classify(&Target::new("ok", format!("{}/ok", server.uri())))
        .await;
    assert_eq!(ok.outcome, Outcome::Reachable);
    assert_eq!(ok.status_code, 200);

    let missing = classifier
        .classify(&Target::new("missing", format!("{}/missing", server.uri())))
        .await;
    assert_eq!(missing.outcome, Outcome::NotFound);
    assert_eq!(missing.status_code, 404);

    let private = classifier
        .classify(&Target::new("private", format!("{}/private", server.uri())))
        .await;
    assert_eq!(private.outcome, Outcome::Forbidden);
    assert_eq!(private.status_code, 403);

    let broken = classifier
        .classify(&Target::new("broken", format!("{}/broken", server.uri())))
        .await;
    assert_eq!(broken.outcome, Outcome::OtherStatus);
    assert_eq!(broken.status_code, 503);
}

#[tokio::test]
async fn classify_follows_redirects_to_the_final_url() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", format!("{}/new", server.uri())),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let classifier = Classifier::new(&test_config()).unwrap();
    let result = classifier
        .classify_get(&Target::new("moved", format!("{}/old", server.uri())))
        .await;

    assert_eq!(result.outcome, Outcome::Reachable);
    assert_eq!(result.status_code, 200);
    assert!(result.final_url.ends_with("/new"));
    // The mock server's host is not a platform domain, so it is reported.
    assert_eq!(result.resolved_domain.as_deref(), Some("127.0.0.1"));
}

#[tokio::test]
async fn classify_times_out_with_status_zero() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let classifier = Classifier::new(&test_config()).unwrap();
    let result = classifier
        .classify(&Target::new("slow", format!("{}/slow", server.uri())))
        .await;

    assert_eq!(result.outcome, Outcome::Timeout);
    assert_eq!(result.status_code, 0);
    assert!(result.resolved_domain.is_none());
}

#[tokio::test]
async fn classify_reports_connection_errors() {
    // Port 1 is never listening.
    let classifier = Classifier::new(&test_config()).unwrap();
    let result = classifier
        .classify(&Target::new("refused", "http://127.0.0.1:1/"))
        .await;

    assert_eq!(result.outcome, Outcome::ConnectionError);
    assert_eq!(result.status_code, 0);
}

#[tokio::test]
async fn repeated_runs_fill_identical_buckets() {
    let server = MockServer::start().await;
    mock_status(&server, "/ok", 200).await;
    mock_status(&server, "/missing", 404).await;
    mock_status(&server, "/private", 403).await;

    let config = test_config();
    let classifier = Classifier::new(&config).unwrap();
    let targets = vec![
        Target::new("ok", format!("{}/ok", server.uri())),
        Target::new("missing", format!("{}/missing", server.uri())),
        Target::new("private", format!("{}/private", server.uri())),
    ];

    let first = run_probes(&classifier, &config, &targets, ProbeMethod::Head).await;
    let second = run_probes(&classifier, &config, &targets, ProbeMethod::Head).await;

    assert_eq!(first.accessible.len(), second.accessible.len());
    assert_eq!(first.not_found.len(), second.not_found.len());
    assert_eq!(first.error.len(), second.error.len());
    assert_eq!(first.total(), 3);
    assert!(!first.interrupted && !second.interrupted);
}
