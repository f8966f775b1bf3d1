//! Smart Pages Scanner
//!
//! Tests the direct Pages URL of every known repository, plus the known
//! custom-domain URL where one is configured, without touching the API.
//! Useful when the Pages endpoints are out of reach.

use std::collections::BTreeMap;
use std::io::{self, Write};

use anyhow::Result;
use tokio::time::sleep;

use check_pages::classifier::Classifier;
use check_pages::config::{root_dir, ScannerConfig};
use check_pages::types::{Outcome, Target, TargetsFile};
use check_pages::{report, storage};

#[derive(Debug)]
struct RepoScan {
    repo: String,
    github_pages_url: Option<String>,
    custom_domain_url: Option<String>,
    accessible: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let root = root_dir();
    let targets_file = storage::load_targets(&root)?;

    let config = ScannerConfig::new(&targets_file.platform_username).with_env_token();
    let classifier = Classifier::new(&config)?;

    report::banner("🔍 SMART GITHUB PAGES SCANNER");
    println!();
    println!("👤 Account: {}", config.platform_username);
    println!("📊 Repositories to scan: {}", targets_file.repos.len());

    tokio::select! {
        result = scan(&classifier, &config, &targets_file) => result,
        _ = tokio::signal::ctrl_c() => {
            println!();
            println!("⚠️  Scan interrupted");
            Ok(())
        }
    }
}

async fn scan(
    classifier: &Classifier,
    config: &ScannerConfig,
    targets_file: &TargetsFile,
) -> Result<()> {
    let mut results = Vec::new();

    for repo in &targets_file.repos {
        println!();
        println!("📦 {}", repo);

        let mut entry = RepoScan {
            repo: repo.clone(),
            github_pages_url: None,
            custom_domain_url: None,
            accessible: false,
        };

        let pages_url = format!("https://{}.github.io/{}/", config.platform_username, repo);
        print!("   🔗 Pages URL: {}... ", report::shorten(&pages_url, 60));
        io::stdout().flush().ok();
        if probe_ok(classifier, repo, &pages_url).await {
            entry.github_pages_url = Some(pages_url);
            entry.accessible = true;
        }
        sleep(config.inter_request_delay()).await;

        if let Some(domain) = targets_file.known_domains.get(repo) {
            let custom_url = format!("https://{}", domain);
            print!("   🌟 Custom domain: {}... ", custom_url);
            io::stdout().flush().ok();
            if probe_ok(classifier, repo, &custom_url).await {
                entry.custom_domain_url = Some(custom_url);
                entry.accessible = true;
            }
            sleep(config.inter_request_delay()).await;
        }

        results.push(entry);
    }

    print_summary(&results);
    Ok(())
}

/// HEAD-probe one URL and print its verdict inline.
async fn probe_ok(classifier: &Classifier, repo: &str, url: &str) -> bool {
    let target = Target::new(repo, url);
    let result = classifier.classify(&target).await;

    if result.outcome == Outcome::Reachable {
        println!("✅ {}", result.status_code);
        true
    } else if result.status_code == 0 {
        println!("❌ {}", result.outcome);
        false
    } else {
        println!("❌ {}", result.status_code);
        false
    }
}

fn print_summary(results: &[RepoScan]) {
    let accessible: Vec<&RepoScan> = results.iter().filter(|r| r.accessible).collect();

    println!();
    report::banner("📊 SUMMARY");
    println!("Total repositories: {}", results.len());
    println!("Accessible: {}", accessible.len());
    println!();

    if accessible.is_empty() {
        println!("❌ NO ACCESSIBLE URLS FOUND");
        println!();
        println!("ℹ️  Possible causes:");
        println!("   • Pages is not enabled on the repositories");
        println!("   • The repositories are private");
        println!("   • The custom domain URLs changed");
        return;
    }

    println!("✅ URLS FOUND:\n");
    for entry in &accessible {
        println!("📦 {}", entry.repo);
        if let Some(url) = &entry.github_pages_url {
            println!("   🌐 GitHub Pages: {}", url);
        }
        if let Some(url) = &entry.custom_domain_url {
            println!("   ⭐ Custom domain: {}", url);
        }
        println!();
    }

    println!("🔧 DASHBOARD URLS:\n");
    for entry in &accessible {
        let live_url = entry
            .custom_domain_url
            .as_ref()
            .or(entry.github_pages_url.as_ref());
        if let Some(url) = live_url {
            println!("// {}", entry.repo);
            println!("liveUrl: \"{}\",", url);
            println!();
        }
    }

    let domains: BTreeMap<String, String> = accessible
        .iter()
        .filter(|e| e.custom_domain_url.is_some())
        .filter_map(|e| {
            e.custom_domain_url
                .as_ref()
                .map(|url| (e.repo.clone(), url.trim_start_matches("https://").to_string()))
        })
        .collect();
    report::print_snippet(&domains);
}
