//! Dashboard URL Checker
//!
//! Probes every labeled URL from the tracking config, prints what is
//! accessible, what needs fixing and which custom domains answered, and
//! writes the bucketed JSON report for the run.

use anyhow::Result;

use check_pages::classifier::Classifier;
use check_pages::config::{root_dir, ScannerConfig};
use check_pages::runner::{run_probes, ProbeMethod};
use check_pages::{report, storage};

const REPORT_FILE: &str = "url_check_results.json";

#[tokio::main]
async fn main() -> Result<()> {
    let root = root_dir();
    let targets_file = storage::load_targets(&root)?;

    let config = ScannerConfig::new(&targets_file.platform_username).with_env_token();
    let classifier = Classifier::new(&config)?;

    report::banner("🔍 DASHBOARD URL CHECKER");
    println!();
    println!("🌐 Testing {} URLs...", targets_file.targets.len());
    println!();

    let scan = run_probes(&classifier, &config, &targets_file.targets, ProbeMethod::Head).await;

    println!();
    report::print_summary(&scan);
    report::print_buckets(&scan);
    report::print_custom_domains(&scan);
    report::print_snippet(&scan.custom_domains());

    storage::save_report(&root, REPORT_FILE, &scan)?;
    println!("💾 Results saved to: {}", REPORT_FILE);

    Ok(())
}
