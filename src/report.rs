//! Console Report Rendering
//!
//! Progress lines, run summaries and the generated `CUSTOM_DOMAINS` snippet.
//! Everything here goes to stdout; the snippet is meant to be copied into
//! the dashboard configuration by hand, never written to a file.

use std::collections::BTreeMap;

use crate::types::{Outcome, ProbeResult, ScanReport};

pub fn banner(title: &str) {
    let line = "=".repeat(80);
    println!("{}", line);
    println!("{}", title);
    println!("{}", line);
}

/// Trim a label or URL for column display.
pub fn shorten(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        format!("{}...", s.chars().take(max_len - 3).collect::<String>())
    } else {
        s.to_string()
    }
}

/// One-line verdict printed next to each probed target.
pub fn status_line(result: &ProbeResult) -> String {
    match result.outcome {
        Outcome::Reachable => "✅ ACCESSIBLE".to_string(),
        Outcome::NotFound => "❌ NOT FOUND".to_string(),
        Outcome::Forbidden => "⚠️  FORBIDDEN".to_string(),
        Outcome::Redirected => format!("↪️  REDIRECTED to {}", result.final_url),
        Outcome::OtherStatus => format!("⚠️  STATUS {}", result.status_code),
        Outcome::Timeout => "⏱️  TIMEOUT".to_string(),
        Outcome::ConnectionError => "❌ CONNECTION ERROR".to_string(),
        Outcome::OtherError => format!(
            "❌ ERROR: {}",
            result.message.as_deref().unwrap_or("request failed")
        ),
    }
}

pub fn print_summary(scan: &ScanReport) {
    banner("📊 SUMMARY");
    println!("✅ Accessible: {}", scan.accessible.len());
    println!("❌ Not found: {}", scan.not_found.len());
    println!("⚠️  Other errors: {}", scan.error.len());
    println!();
}

/// List the accessible targets, then the ones that need fixing.
pub fn print_buckets(scan: &ScanReport) {
    if !scan.accessible.is_empty() {
        println!("✅ ACCESSIBLE URLS (ready to use):\n");
        for result in &scan.accessible {
            println!("  {}", result.label);
            println!("  → {}\n", result.requested_url);
        }
    }

    if !scan.not_found.is_empty() {
        println!("\n❌ BROKEN URLS (need fixing):\n");
        for result in &scan.not_found {
            println!("  {}", result.label);
            println!("  → {}", result.requested_url);
            println!("  {}\n", status_line(result));
        }
    }
}

/// Detected custom domains, with the repository each one maps to.
pub fn print_custom_domains(scan: &ScanReport) {
    println!("\n🌟 CUSTOM DOMAINS DETECTED:\n");

    for result in &scan.accessible {
        if let Some(domain) = &result.resolved_domain {
            println!("  🌐 {}", domain);
            println!("     Project: {}", result.label);
            if let Some(repo) = crate::domains::infer_repo_from_label(&result.label) {
                println!("     Repository: {}", repo);
            }
            println!();
        }
    }
}

/// The object literal the dashboard configuration expects, verbatim.
pub fn custom_domains_snippet(domains: &BTreeMap<String, String>) -> String {
    let mut snippet = String::from("const CUSTOM_DOMAINS = {\n");
    for (repo, domain) in domains {
        snippet.push_str(&format!("    '{}': '{}',\n", repo, domain));
    }
    snippet.push_str("};");
    snippet
}

pub fn print_snippet(domains: &BTreeMap<String, String>) {
    if domains.is_empty() {
        return;
    }
    println!("\n🔧 DASHBOARD SNIPPET:\n");
    println!("{}", custom_domains_snippet(domains));
    println!();
}
