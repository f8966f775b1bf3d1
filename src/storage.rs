use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::types::TargetsFile;

const TARGETS_FILE: &str = "tracking/targets.yml";

/// Load the target lists and known-domain table from `tracking/targets.yml`.
pub fn load_targets(root: &str) -> Result<TargetsFile> {
    let path = PathBuf::from(root).join(TARGETS_FILE);
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read targets from {:?}", path))?;

    let targets: TargetsFile =
        serde_yaml::from_str(&content).with_context(|| "Failed to parse targets YAML")?;

    Ok(targets)
}

/// Write the run's JSON report at its fixed relative path.
pub fn save_report<T: Serialize>(root: &str, filename: &str, report: &T) -> Result<()> {
    let path = PathBuf::from(root).join(filename);

    if let Some(parent) = path.parent() {
        if parent != Path::new("") {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create report directory {:?}", parent))?;
        }
    }

    let json = serde_json::to_string_pretty(report)?;
    fs::write(&path, json).with_context(|| format!("Failed to write report to {:?}", path))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Outcome, ProbeResult, ScanReport};

    #[test]
    fn test_parse_targets_yaml() {
        let yaml = r#"
platform_username: someuser
targets:
  - label: "Wolf - Bathroom"
    url: https://bathroom.wolfcarpenters.com
repos:
  - BATHROOM-REMODELING-WOLF
known_domains:
  BATHROOM-REMODELING-WOLF: bathroom.wolfcarpenters.com
"#;
        let targets: TargetsFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(targets.platform_username, "someuser");
        assert_eq!(targets.targets.len(), 1);
        assert_eq!(targets.repos, vec!["BATHROOM-REMODELING-WOLF"]);
        assert_eq!(
            targets.known_domains.get("BATHROOM-REMODELING-WOLF").map(String::as_str),
            Some("bathroom.wolfcarpenters.com")
        );
    }

    #[test]
    fn test_save_report_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap();

        let mut scan = ScanReport::default();
        scan.push(ProbeResult {
            label: "Wolf - Bathroom".to_string(),
            requested_url: "https://bathroom.wolfcarpenters.com".to_string(),
            final_url: "https://bathroom.wolfcarpenters.com/".to_string(),
            status_code: 200,
            outcome: Outcome::Reachable,
            resolved_domain: Some("bathroom.wolfcarpenters.com".to_string()),
            message: None,
            checked_at: "2026-01-01 00:00:00 UTC".to_string(),
        });

        save_report(root, "url_check_results.json", &scan).unwrap();

        let written = fs::read_to_string(dir.path().join("url_check_results.json")).unwrap();
        let loaded: ScanReport = serde_json::from_str(&written).unwrap();
        assert_eq!(loaded.accessible.len(), 1);
        assert_eq!(loaded.accessible[0].status_code, 200);
        assert!(!loaded.interrupted);
    }
}
