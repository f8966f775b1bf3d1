//! Dashboard Sync API
//!
//! Loopback-only HTTP front for the scanner, so the dashboard button can
//! pull fresh URLs without anyone running a script:
//! - GET /api/health: liveness and configured account
//! - GET /api/custom-domains: probe every known repo, domains only
//! - GET /api/sync-github: full synchronous probe sequence
//!
//! Binds 127.0.0.1 only; no authentication on purpose.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::time::sleep;

use crate::classifier::Classifier;
use crate::config::ScannerConfig;
use crate::types::{Outcome, ProbeResult, Target};

pub const DEFAULT_PORT: u16 = 5000;

pub struct AppState {
    classifier: Classifier,
    config: ScannerConfig,
    repos: Vec<String>,
}

impl AppState {
    pub fn new(config: ScannerConfig, repos: Vec<String>) -> Result<Self> {
        let classifier = Classifier::new(&config)?;
        Ok(Self {
            classifier,
            config,
            repos,
        })
    }
}

/// One repository's sync entry, shaped the way the dashboard consumes it.
#[derive(Debug, Clone, Serialize)]
pub struct RepoSync {
    pub repo_name: String,
    pub github_pages_url: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SyncReport {
    pub total_checked: usize,
    pub active: usize,
    pub with_custom_domain: usize,
    pub not_found: usize,
    pub repositories: Vec<RepoSync>,
    pub custom_domains: BTreeMap<String, String>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health))
        .route("/api/custom-domains", get(custom_domains))
        .route("/api/sync-github", get(sync_github))
        .with_state(state)
}

/// Run the API on the loopback interface until the process is stopped.
pub async fn serve(state: Arc<AppState>, port: u16) -> Result<()> {
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("listening on http://{}", addr);
    axum::serve(listener, router(state))
        .await
        .context("Server crashed")?;

    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Dashboard API is running",
        "github_username": state.config.platform_username,
    }))
}

async fn custom_domains(State(state): State<Arc<AppState>>) -> Json<Value> {
    tracing::info!("custom-domains sweep over {} repos", state.repos.len());

    let mut domains = BTreeMap::new();
    for repo in &state.repos {
        let entry = probe_repo(&state, repo).await;
        if entry.status == "active" {
            if let Some(domain) = entry.custom_domain {
                domains.insert(repo.clone(), domain);
            }
        }
        sleep(state.config.inter_request_delay()).await;
    }

    Json(json!({
        "success": true,
        "count": domains.len(),
        "domains": domains,
    }))
}

async fn sync_github(State(state): State<Arc<AppState>>) -> Json<SyncReport> {
    tracing::info!("full sync over {} repos", state.repos.len());

    let mut report = SyncReport {
        total_checked: state.repos.len(),
        active: 0,
        with_custom_domain: 0,
        not_found: 0,
        repositories: Vec::with_capacity(state.repos.len()),
        custom_domains: BTreeMap::new(),
    };

    for repo in &state.repos {
        let entry = probe_repo(&state, repo).await;

        match entry.status.as_str() {
            "active" => {
                report.active += 1;
                if let Some(domain) = &entry.custom_domain {
                    report.with_custom_domain += 1;
                    report.custom_domains.insert(repo.clone(), domain.clone());
                }
            }
            "not_found" => report.not_found += 1,
            _ => {}
        }

        report.repositories.push(entry);
        sleep(state.config.inter_request_delay()).await;
    }

    tracing::info!(
        "sync complete: {} active, {} with custom domain",
        report.active,
        report.with_custom_domain
    );

    Json(report)
}

async fn probe_repo(state: &AppState, repo: &str) -> RepoSync {
    let url = format!(
        "https://{}.github.io/{}/",
        state.config.platform_username, repo
    );
    let target = Target::new(repo, &url);
    let result = state.classifier.classify_get(&target).await;
    sync_entry(repo, &url, &result)
}

/// Collapse a probe result into the dashboard's three sync states.
fn sync_entry(repo: &str, url: &str, result: &ProbeResult) -> RepoSync {
    match result.outcome {
        Outcome::Reachable => RepoSync {
            repo_name: repo.to_string(),
            github_pages_url: url.to_string(),
            status: "active".to_string(),
            status_code: Some(result.status_code),
            custom_domain: result.resolved_domain.clone(),
            final_url: Some(result.final_url.clone()),
            error: None,
        },
        outcome if outcome.is_transport_failure() => RepoSync {
            repo_name: repo.to_string(),
            github_pages_url: url.to_string(),
            status: "error".to_string(),
            status_code: None,
            custom_domain: None,
            final_url: None,
            error: Some(
                result
                    .message
                    .clone()
                    .unwrap_or_else(|| outcome.to_string()),
            ),
        },
        _ => RepoSync {
            repo_name: repo.to_string(),
            github_pages_url: url.to_string(),
            status: "not_found".to_string(),
            status_code: Some(result.status_code),
            custom_domain: None,
            final_url: None,
            error: None,
        },
    }
}

const INDEX_PAGE: &str = r#"<html>
<head>
    <title>Dashboard API</title>
    <style>
        body { font-family: Arial, sans-serif; max-width: 800px; margin: 50px auto; padding: 20px; background: #0f0f0f; color: #fff; }
        h1 { color: #6366f1; }
        .endpoint { background: #1a1a1a; padding: 15px; margin: 10px 0; border-radius: 8px; border-left: 4px solid #6366f1; }
        code { background: #2a2a2a; padding: 2px 6px; border-radius: 4px; }
    </style>
</head>
<body>
    <h1>🚀 Dashboard API</h1>
    <p>Keeps the dashboard in sync with GitHub Pages.</p>
    <div class="endpoint"><h3>GET /api/health</h3><p>Liveness check</p></div>
    <div class="endpoint"><h3>GET /api/custom-domains</h3><p>Detected custom domains only</p></div>
    <div class="endpoint"><h3>GET /api/sync-github</h3><p>Full probe sequence with aggregate results</p></div>
    <p><a href="/api/health" style="color: #6366f1;">Try it</a></p>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn result(outcome: Outcome, status_code: u16) -> ProbeResult {
        ProbeResult {
            label: "AMCC-LP".to_string(),
            requested_url: "https://someuser.github.io/AMCC-LP/".to_string(),
            final_url: "https://someuser.github.io/AMCC-LP/".to_string(),
            status_code,
            outcome,
            resolved_domain: None,
            message: None,
            checked_at: "2026-01-01 00:00:00 UTC".to_string(),
        }
    }

    #[test]
    fn test_sync_entry_active_with_domain() {
        let mut probe = result(Outcome::Reachable, 200);
        probe.final_url = "https://bathroom.wolfcarpenters.com/".to_string();
        probe.resolved_domain = Some("bathroom.wolfcarpenters.com".to_string());

        let entry = sync_entry("BATHROOM-REMODELING-WOLF", &probe.requested_url.clone(), &probe);
        assert_eq!(entry.status, "active");
        assert_eq!(
            entry.custom_domain.as_deref(),
            Some("bathroom.wolfcarpenters.com")
        );
        assert_eq!(entry.status_code, Some(200));
    }

    #[test]
    fn test_sync_entry_non_200_is_not_found() {
        let entry = sync_entry("AMCC-LP", "https://x/", &result(Outcome::NotFound, 404));
        assert_eq!(entry.status, "not_found");
        assert_eq!(entry.status_code, Some(404));

        let entry = sync_entry("AMCC-LP", "https://x/", &result(Outcome::Forbidden, 403));
        assert_eq!(entry.status, "not_found");
    }

    #[test]
    fn test_sync_entry_transport_failure_is_error() {
        let entry = sync_entry("AMCC-LP", "https://x/", &result(Outcome::Timeout, 0));
        assert_eq!(entry.status, "error");
        assert_eq!(entry.error.as_deref(), Some("timeout"));
        assert_eq!(entry.status_code, None);
    }
}
