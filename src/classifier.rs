//! Reachability Classifier
//!
//! One HTTP request per target, every outcome folded into a ProbeResult:
//! - HEAD by default, GET where the redirect chain matters
//! - Redirects followed automatically, fixed timeout, no retries
//! - Transport failures become Timeout / ConnectionError / OtherError

use anyhow::{Context, Result};
use chrono::Utc;
use reqwest::{Client, Method};

use crate::config::ScannerConfig;
use crate::domains;
use crate::types::{Outcome, ProbeResult, Target};

/// Transport errors keep only the head of their message in the report.
const ERROR_SNIPPET_LEN: usize = 50;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Stateless probe engine. Each call is an independent request/classify
/// cycle; nothing is shared across calls beyond the connection pool.
pub struct Classifier {
    client: Client,
}

impl Classifier {
    pub fn new(config: &ScannerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }

    /// HEAD probe, the light default.
    pub async fn classify(&self, target: &Target) -> ProbeResult {
        self.probe(target, Method::HEAD).await
    }

    /// GET probe, for runs that need the full redirect chain followed the
    /// way a browser would.
    pub async fn classify_get(&self, target: &Target) -> ProbeResult {
        self.probe(target, Method::GET).await
    }

    async fn probe(&self, target: &Target, method: Method) -> ProbeResult {
        let checked_at = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();

        match self.client.request(method, &target.url).send().await {
            Ok(response) => {
                let status_code = response.status().as_u16();
                let final_url = response.url().to_string();
                let outcome = Outcome::from_status(status_code);

                // Only a site that actually answered somewhere can reveal a
                // custom domain.
                let resolved_domain = match outcome {
                    Outcome::Reachable | Outcome::Redirected => {
                        domains::custom_domain(&final_url)
                    }
                    _ => None,
                };

                ProbeResult {
                    label: target.label.clone(),
                    requested_url: target.url.clone(),
                    final_url,
                    status_code,
                    outcome,
                    resolved_domain,
                    message: None,
                    checked_at,
                }
            }
            Err(e) => error_result(target, &e, checked_at),
        }
    }
}

/// Map a transport error onto the taxonomy. Timeout is checked before
/// connection failure; anything else keeps a truncated diagnostic.
fn error_result(target: &Target, e: &reqwest::Error, checked_at: String) -> ProbeResult {
    let (outcome, message) = if e.is_timeout() {
        (Outcome::Timeout, None)
    } else if e.is_connect() {
        (Outcome::ConnectionError, None)
    } else {
        (Outcome::OtherError, Some(truncate_message(&e.to_string())))
    };

    ProbeResult {
        label: target.label.clone(),
        requested_url: target.url.clone(),
        final_url: target.url.clone(),
        status_code: 0,
        outcome,
        resolved_domain: None,
        message,
        checked_at,
    }
}

fn truncate_message(msg: &str) -> String {
    msg.chars().take(ERROR_SNIPPET_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_message() {
        assert_eq!(truncate_message("short"), "short");
        let long = "x".repeat(120);
        assert_eq!(truncate_message(&long).chars().count(), ERROR_SNIPPET_LEN);
    }

    #[test]
    fn test_classifier_builds_from_config() {
        let config = ScannerConfig::new("someuser");
        assert!(Classifier::new(&config).is_ok());
    }
}
