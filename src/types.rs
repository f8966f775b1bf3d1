use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One labeled URL to probe. Defined at startup, never mutated.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Target {
    pub label: String,
    pub url: String,
}

impl Target {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// Total classification taxonomy for a single probe.
///
/// Every probe ends in exactly one of these; transport failures are carried
/// as variants instead of errors so callers can match exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Reachable,
    NotFound,
    Forbidden,
    Redirected,
    OtherStatus,
    Timeout,
    ConnectionError,
    OtherError,
}

impl Outcome {
    /// Classify a response status code. Transport-level failures never reach
    /// this point; they are mapped directly to their variants.
    pub fn from_status(code: u16) -> Self {
        match code {
            200 => Outcome::Reachable,
            404 => Outcome::NotFound,
            403 => Outcome::Forbidden,
            300..=399 => Outcome::Redirected,
            _ => Outcome::OtherStatus,
        }
    }

    /// True when the probe never got an HTTP response (status code 0).
    pub fn is_transport_failure(self) -> bool {
        matches!(
            self,
            Outcome::Timeout | Outcome::ConnectionError | Outcome::OtherError
        )
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::Reachable => "reachable",
            Outcome::NotFound => "not found",
            Outcome::Forbidden => "forbidden",
            Outcome::Redirected => "redirected",
            Outcome::OtherStatus => "other status",
            Outcome::Timeout => "timeout",
            Outcome::ConnectionError => "connection error",
            Outcome::OtherError => "error",
        };
        write!(f, "{}", s)
    }
}

/// Result of one probe against one target. Built once, never mutated.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProbeResult {
    pub label: String,
    pub requested_url: String,
    pub final_url: String,
    /// 0 when the request never produced a response.
    pub status_code: u16,
    pub outcome: Outcome,
    /// Final host when it is neither the Pages nor the Netlify domain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub checked_at: String,
}

/// Report bucket, derived from the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Accessible,
    NotFound,
    Error,
}

impl ProbeResult {
    /// Bucket placement: reachable targets on one side, confirmed-missing and
    /// no-response targets on another, everything else (403, stray 3xx,
    /// unexpected statuses) in the error bucket.
    pub fn bucket(&self) -> Bucket {
        match self.outcome {
            Outcome::Reachable => Bucket::Accessible,
            Outcome::NotFound => Bucket::NotFound,
            _ if self.status_code == 0 => Bucket::NotFound,
            _ => Bucket::Error,
        }
    }
}

/// Aggregate of one scan run, grouped the way the report file is written.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct ScanReport {
    pub accessible: Vec<ProbeResult>,
    pub not_found: Vec<ProbeResult>,
    pub error: Vec<ProbeResult>,
    #[serde(default)]
    pub interrupted: bool,
}

impl ScanReport {
    pub fn push(&mut self, result: ProbeResult) {
        match result.bucket() {
            Bucket::Accessible => self.accessible.push(result),
            Bucket::NotFound => self.not_found.push(result),
            Bucket::Error => self.error.push(result),
        }
    }

    pub fn total(&self) -> usize {
        self.accessible.len() + self.not_found.len() + self.error.len()
    }

    /// Custom-domain map from the accessible bucket: repository identifier
    /// (inferred from the label) to resolved external hostname.
    pub fn custom_domains(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        for result in &self.accessible {
            if let Some(domain) = &result.resolved_domain {
                if let Some(repo) = crate::domains::infer_repo_from_label(&result.label) {
                    map.insert(repo.to_string(), domain.clone());
                }
            }
        }
        map
    }

    /// Same map for runs whose labels already are repository names.
    pub fn custom_domains_by_label(&self) -> BTreeMap<String, String> {
        self.accessible
            .iter()
            .filter_map(|r| {
                r.resolved_domain
                    .as_ref()
                    .map(|d| (r.label.clone(), d.clone()))
            })
            .collect()
    }
}

/// Parsed `tracking/targets.yml`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TargetsFile {
    pub platform_username: String,
    #[serde(default)]
    pub targets: Vec<Target>,
    #[serde(default)]
    pub repos: Vec<String>,
    /// Known custom domains to test directly, repo name -> hostname.
    #[serde(default)]
    pub known_domains: BTreeMap<String, String>,
}
