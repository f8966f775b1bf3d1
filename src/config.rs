//! Scanner Configuration
//!
//! One explicit value handed to the classifier and the GitHub client at
//! construction, instead of globals scattered across binaries.

use std::env;
use std::time::Duration;

/// Configuration shared by every probe in a run.
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// GitHub account whose Pages sites are being checked.
    pub platform_username: String,
    /// Timeout for direct site probes.
    pub request_timeout_secs: u64,
    /// Shorter timeout for lightweight CNAME raw-content probes.
    pub cname_timeout_secs: u64,
    /// Fixed pause between probes, to stay polite to third-party servers.
    pub inter_request_delay_ms: u64,
    /// Optional API token, attached uniformly to every GitHub request.
    pub auth_token: Option<String>,
}

impl ScannerConfig {
    pub fn new(platform_username: impl Into<String>) -> Self {
        Self {
            platform_username: platform_username.into(),
            request_timeout_secs: 10,
            cname_timeout_secs: 5,
            inter_request_delay_ms: 300,
            auth_token: None,
        }
    }

    /// Pick up the optional token from `GITHUB_TOKEN`.
    pub fn with_env_token(mut self) -> Self {
        self.auth_token = env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn cname_timeout(&self) -> Duration {
        Duration::from_secs(self.cname_timeout_secs)
    }

    pub fn inter_request_delay(&self) -> Duration {
        Duration::from_millis(self.inter_request_delay_ms)
    }
}

/// Root directory holding `tracking/`, overridable the usual way.
pub fn root_dir() -> String {
    env::var("ROOT").unwrap_or_else(|_| ".".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScannerConfig::new("someuser");
        assert_eq!(config.platform_username, "someuser");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.cname_timeout(), Duration::from_secs(5));
        assert_eq!(config.inter_request_delay(), Duration::from_millis(300));
        assert!(config.auth_token.is_none());
    }
}
