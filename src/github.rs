//! GitHub Pages Inspection
//!
//! REST client for the endpoints the scan needs:
//! - paginated repository listing
//! - per-repository Pages configuration
//! - CNAME lookup, via the contents endpoint or the raw-content endpoint
//!
//! Custom-domain resolution prefers the declared homepage field, then falls
//! back to a CNAME file on one of the candidate branches.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::time::sleep;

use crate::config::ScannerConfig;
use crate::domains;

const API_BASE: &str = "https://api.github.com";
const RAW_BASE: &str = "https://raw.githubusercontent.com";
const PER_PAGE: usize = 100;
/// Pause between listing pages, same politeness rule as the probe loop.
const PAGE_DELAY_MS: u64 = 500;
/// Branches that may carry a CNAME file, most likely first.
const CNAME_BRANCHES: [&str; 3] = ["gh-pages", "main", "master"];

/// Repository entry from the listing endpoint, reduced to what the scan uses.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Repo {
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub has_pages: bool,
}

/// Pages configuration of one repository.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PagesInfo {
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub source: Option<PagesSource>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PagesSource {
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

impl PagesInfo {
    pub fn is_built(&self) -> bool {
        self.status.as_deref() == Some("built")
    }

    pub fn branch(&self) -> &str {
        self.source
            .as_ref()
            .and_then(|s| s.branch.as_deref())
            .unwrap_or("unknown")
    }

    pub fn path(&self) -> &str {
        self.source
            .as_ref()
            .and_then(|s| s.path.as_deref())
            .unwrap_or("/")
    }
}

#[derive(Debug, Deserialize)]
struct ContentsFile {
    content: String,
}

/// Per-repository summary written into the Pages scan report file.
#[derive(Debug, Clone, Serialize)]
pub struct PagesRepoReport {
    pub name: String,
    pub full_name: String,
    pub description: String,
    pub pages_url: String,
    pub custom_domain: Option<String>,
    pub status: String,
    pub branch: String,
    pub path: String,
    pub is_active: bool,
}

pub struct GitHubClient {
    client: Client,
    /// Separate client with the short timeout for raw CNAME probes.
    raw_client: Client,
    username: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(config: &ScannerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent("check_pages")
            .build()
            .context("Failed to build GitHub API client")?;

        let raw_client = Client::builder()
            .timeout(config.cname_timeout())
            .user_agent("check_pages")
            .build()
            .context("Failed to build raw-content client")?;

        Ok(Self {
            client,
            raw_client,
            username: config.platform_username.clone(),
            token: config.auth_token.clone(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Default Pages URL for one of the account's repositories.
    pub fn pages_url(&self, repo: &str) -> String {
        format!("https://{}.github.io/{}/", self.username, repo)
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let mut request = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github.v3+json");
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("token {}", token));
        }
        request
    }

    /// All public repositories of the account, walking the paginated listing.
    pub async fn list_repos(&self) -> Result<Vec<Repo>> {
        let mut repos = Vec::new();
        let mut page = 1u32;

        loop {
            let url = format!("{}/users/{}/repos", API_BASE, self.username);
            let response = self
                .get(&url)
                .query(&[
                    ("per_page", PER_PAGE.to_string()),
                    ("page", page.to_string()),
                    ("type", "public".to_string()),
                ])
                .send()
                .await
                .with_context(|| format!("Failed to fetch repository listing page {}", page))?;

            if !response.status().is_success() {
                bail!(
                    "Repository listing failed with status {}",
                    response.status().as_u16()
                );
            }

            let batch: Vec<Repo> = response
                .json()
                .await
                .context("Failed to parse repository listing")?;

            if batch.is_empty() {
                break;
            }

            let last_page = batch.len() < PER_PAGE;
            repos.extend(batch);

            if last_page {
                break;
            }

            page += 1;
            sleep(Duration::from_millis(PAGE_DELAY_MS)).await;
        }

        Ok(repos)
    }

    /// Pages configuration for one repository. None when Pages is not
    /// enabled (the endpoint answers 404).
    pub async fn pages_info(&self, repo: &str) -> Result<Option<PagesInfo>> {
        let url = format!("{}/repos/{}/{}/pages", API_BASE, self.username, repo);
        let response = self
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to query Pages configuration for {}", repo))?;

        match response.status().as_u16() {
            200 => {
                let info = response
                    .json()
                    .await
                    .context("Failed to parse Pages configuration")?;
                Ok(Some(info))
            }
            404 => Ok(None),
            status => {
                eprintln!("⚠️  Pages lookup for {} returned {}", repo, status);
                Ok(None)
            }
        }
    }

    /// CNAME content through the contents endpoint (base64 payload).
    pub async fn cname_via_contents(&self, repo: &str) -> Result<Option<String>> {
        let url = format!(
            "{}/repos/{}/{}/contents/CNAME",
            API_BASE, self.username, repo
        );
        let response = self
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to query CNAME for {}", repo))?;

        if response.status().as_u16() != 200 {
            return Ok(None);
        }

        let file: ContentsFile = response
            .json()
            .await
            .context("Failed to parse CNAME contents response")?;
        let text = decode_contents(&file.content)?;

        Ok(valid_cname(&text))
    }

    /// CNAME through the raw-content endpoint, trying candidate branches in
    /// order. Fetch failures just move on to the next branch.
    pub async fn cname_via_raw(&self, repo: &str) -> Option<String> {
        for branch in CNAME_BRANCHES {
            let url = format!("{}/{}/{}/{}/CNAME", RAW_BASE, self.username, repo, branch);
            let response = match self.raw_client.get(&url).send().await {
                Ok(response) => response,
                Err(_) => continue,
            };

            if response.status().as_u16() != 200 {
                continue;
            }

            if let Ok(text) = response.text().await {
                if let Some(domain) = valid_cname(&text) {
                    return Some(domain);
                }
            }
        }

        None
    }

    /// Resolve a repository's custom domain: declared homepage first, then a
    /// CNAME file from a candidate branch.
    pub async fn custom_domain(&self, repo: &Repo) -> Option<String> {
        if let Some(domain) = homepage_domain(repo) {
            return Some(domain);
        }
        self.cname_via_raw(&repo.name).await
    }
}

/// Declared homepage as a bare host, unless it points back at the platform.
pub fn homepage_domain(repo: &Repo) -> Option<String> {
    let homepage = repo.homepage.as_deref()?.trim();
    if homepage.is_empty() {
        return None;
    }

    let host = domains::strip_to_host(homepage);
    if host.is_empty() || domains::is_platform_host(&host) {
        return None;
    }

    Some(host)
}

/// A CNAME entry is the bare domain; anything mentioning the platform host
/// means no custom domain is configured.
pub fn valid_cname(text: &str) -> Option<String> {
    let domain = text.trim();
    if domain.is_empty() || domain.contains("github.io") {
        return None;
    }
    Some(domain.to_string())
}

fn decode_contents(content: &str) -> Result<String> {
    // The contents endpoint wraps base64 at 60 columns.
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact)
        .context("Failed to decode file contents")?;
    String::from_utf8(bytes).context("File contents are not UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(homepage: Option<&str>) -> Repo {
        Repo {
            name: "BATHROOM-REMODELING-WOLF".to_string(),
            full_name: "someuser/BATHROOM-REMODELING-WOLF".to_string(),
            description: None,
            homepage: homepage.map(String::from),
            html_url: "https://github.com/someuser/BATHROOM-REMODELING-WOLF".to_string(),
            created_at: None,
            updated_at: None,
            has_pages: true,
        }
    }

    #[test]
    fn test_homepage_domain() {
        assert_eq!(
            homepage_domain(&repo(Some("https://bathroom.wolfcarpenters.com/"))),
            Some("bathroom.wolfcarpenters.com".to_string())
        );
        assert_eq!(
            homepage_domain(&repo(Some("https://someuser.github.io/BATHROOM-REMODELING-WOLF/"))),
            None
        );
        assert_eq!(homepage_domain(&repo(Some(""))), None);
        assert_eq!(homepage_domain(&repo(None)), None);
    }

    #[test]
    fn test_valid_cname() {
        assert_eq!(
            valid_cname("bathroom.wolfcarpenters.com\n"),
            Some("bathroom.wolfcarpenters.com".to_string())
        );
        assert_eq!(valid_cname("someuser.github.io"), None);
        assert_eq!(valid_cname("   "), None);
    }

    #[test]
    fn test_decode_contents_handles_wrapped_base64() {
        // "bathroom.wolfcarpenters.com\n" encoded with a line break inside.
        let wrapped = "YmF0aHJvb20ud29sZmNh\ncnBlbnRlcnMuY29tCg==";
        let decoded = decode_contents(wrapped).unwrap();
        assert_eq!(decoded.trim(), "bathroom.wolfcarpenters.com");
    }
}
