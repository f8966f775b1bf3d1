//! GitHub Pages Verifier
//!
//! Synthesizes the default Pages URL for every known repository, GET-probes
//! it with redirects followed, and reports which sites are live and which
//! ones resolve to a custom domain.

use anyhow::Result;

use check_pages::classifier::Classifier;
use check_pages::config::{root_dir, ScannerConfig};
use check_pages::runner::{run_probes, ProbeMethod};
use check_pages::types::Target;
use check_pages::{report, storage};

const REPORT_FILE: &str = "github_pages_verification.json";

#[tokio::main]
async fn main() -> Result<()> {
    let root = root_dir();
    let targets_file = storage::load_targets(&root)?;

    let config = ScannerConfig::new(&targets_file.platform_username).with_env_token();
    let classifier = Classifier::new(&config)?;

    report::banner("🚀 GITHUB PAGES VERIFIER");
    println!();
    println!("👤 Account: {}", config.platform_username);
    println!("📊 Repositories to verify: {}", targets_file.repos.len());
    println!();

    let targets: Vec<Target> = targets_file
        .repos
        .iter()
        .map(|repo| {
            let url = format!("https://{}.github.io/{}/", config.platform_username, repo);
            Target::new(repo, url)
        })
        .collect();

    let scan = run_probes(&classifier, &config, &targets, ProbeMethod::Get).await;
    let domains = scan.custom_domains_by_label();

    println!();
    report::banner("📊 SUMMARY");
    println!("Total verified: {}", scan.total());
    println!("Pages active: {}", scan.accessible.len());
    println!("With custom domain: {}", domains.len());
    println!("Not found (404): {}", scan.not_found.len());
    println!();

    if !scan.accessible.is_empty() {
        println!("📋 ACTIVE PAGES:\n");
        for result in &scan.accessible {
            println!("✅ {}", result.label);
            match &result.resolved_domain {
                Some(domain) => println!("   🌟 Domain: https://{}", domain),
                None => println!("   🌐 GitHub Pages: {}", result.requested_url),
            }
            println!();
        }
    }

    report::print_snippet(&domains);

    storage::save_report(&root, REPORT_FILE, &scan)?;
    println!("💾 Results saved to: {}", REPORT_FILE);

    Ok(())
}
