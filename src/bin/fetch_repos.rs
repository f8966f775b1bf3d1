//! GitHub Repository Scanner
//!
//! Walks every public repository with Pages enabled through the REST API
//! and resolves each one's custom domain: declared homepage first, then the
//! CNAME file (contents endpoint, raw content on candidate branches last).

use std::collections::BTreeMap;
use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;
use tokio::time::sleep;

use check_pages::config::{root_dir, ScannerConfig};
use check_pages::github::{self, GitHubClient, PagesRepoReport, Repo};
use check_pages::{report, storage};

const REPORT_FILE: &str = "github_pages_scan.json";

#[derive(Debug, Serialize)]
struct RepoScanReport {
    total_repos: usize,
    pages_enabled: usize,
    custom_domains: usize,
    repositories: Vec<PagesRepoReport>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let root = root_dir();
    let targets_file = storage::load_targets(&root)?;

    let config = ScannerConfig::new(&targets_file.platform_username).with_env_token();
    let github = GitHubClient::new(&config)?;

    report::banner("🚀 GITHUB PAGES URL SCANNER");
    if config.auth_token.is_some() {
        println!("✅ Token configured (5000 requests/hour)");
    } else {
        println!("⚠️  No token configured (60 requests/hour)");
    }
    println!();

    tokio::select! {
        result = scan(&root, &config, &github) => result,
        _ = tokio::signal::ctrl_c() => {
            println!();
            println!("⚠️  Scan interrupted");
            Ok(())
        }
    }
}

async fn scan(root: &str, config: &ScannerConfig, github: &GitHubClient) -> Result<()> {
    println!("🔍 Fetching repositories for {}...", github.username());
    let repos: Vec<Repo> = github
        .list_repos()
        .await?
        .into_iter()
        .filter(|r| r.has_pages)
        .collect();
    println!("✅ Found {} repositories with Pages enabled", repos.len());
    println!();

    let mut entries = Vec::new();

    for repo in &repos {
        print!("📦 {}... ", repo.name);
        io::stdout().flush().ok();

        let pages = github.pages_info(&repo.name).await?;
        let custom_domain = resolve_domain(github, repo).await;

        match (&pages, &custom_domain) {
            (Some(_), Some(domain)) => println!("✅ Pages ACTIVE | 🌟 Domain: {}", domain),
            (Some(info), None) => println!(
                "✅ Pages ACTIVE | 🌐 URL: {}",
                info.html_url.as_deref().unwrap_or("")
            ),
            (None, Some(domain)) => println!("🌟 Domain: {}", domain),
            (None, None) => println!("⚪ Pages not configured"),
        }

        entries.push(PagesRepoReport {
            name: repo.name.clone(),
            full_name: repo.full_name.clone(),
            description: repo.description.clone().unwrap_or_default(),
            pages_url: pages
                .as_ref()
                .and_then(|p| p.html_url.clone())
                .unwrap_or_else(|| github.pages_url(&repo.name)),
            custom_domain: custom_domain.clone(),
            status: pages
                .as_ref()
                .and_then(|p| p.status.clone())
                .unwrap_or_default(),
            branch: pages
                .as_ref()
                .map(|p| p.branch().to_string())
                .unwrap_or_else(|| "unknown".to_string()),
            path: pages
                .as_ref()
                .map(|p| p.path().to_string())
                .unwrap_or_else(|| "/".to_string()),
            is_active: pages.as_ref().map(|p| p.is_built()).unwrap_or(false),
        });

        sleep(config.inter_request_delay()).await;
    }

    let domains: BTreeMap<String, String> = entries
        .iter()
        .filter_map(|e| e.custom_domain.clone().map(|d| (e.name.clone(), d)))
        .collect();

    println!();
    report::banner("📊 SUMMARY");
    println!("Total repositories: {}", entries.len());
    println!(
        "With Pages built: {}",
        entries.iter().filter(|e| e.is_active).count()
    );
    println!("With custom domain: {}", domains.len());
    println!();

    if !domains.is_empty() {
        println!("🌟 CUSTOM DOMAINS FOUND:\n");
        for (name, domain) in &domains {
            println!("  • {:40} → {}", name, domain);
        }
    }

    report::print_snippet(&domains);

    let scan_report = RepoScanReport {
        total_repos: entries.len(),
        pages_enabled: entries.iter().filter(|e| e.is_active).count(),
        custom_domains: domains.len(),
        repositories: entries,
    };
    storage::save_report(root, REPORT_FILE, &scan_report)?;
    println!("💾 Results saved to: {}", REPORT_FILE);

    Ok(())
}

/// Homepage wins, then the contents-endpoint CNAME, then raw content.
async fn resolve_domain(github: &GitHubClient, repo: &Repo) -> Option<String> {
    if let Some(domain) = github::homepage_domain(repo) {
        return Some(domain);
    }
    if let Ok(Some(domain)) = github.cname_via_contents(&repo.name).await {
        return Some(domain);
    }
    github.cname_via_raw(&repo.name).await
}
