//! Sequential Probe Driver
//!
//! Targets are probed strictly one at a time with a fixed pause in between.
//! Ctrl-C drops the remaining queue and leaves a partial report.

use std::io::{self, Write};

use tokio::time::sleep;

use crate::classifier::Classifier;
use crate::config::ScannerConfig;
use crate::report;
use crate::types::{ScanReport, Target};

/// Request method used for every probe in a run.
#[derive(Debug, Clone, Copy)]
pub enum ProbeMethod {
    Head,
    Get,
}

/// Walk the target list sequentially and accumulate the bucketed report.
pub async fn run_probes(
    classifier: &Classifier,
    config: &ScannerConfig,
    targets: &[Target],
    method: ProbeMethod,
) -> ScanReport {
    let mut scan = ScanReport::default();

    for (i, target) in targets.iter().enumerate() {
        print!("📍 {:<40} ", report::shorten(&target.label, 40));
        io::stdout().flush().ok();

        let probe = async {
            match method {
                ProbeMethod::Head => classifier.classify(target).await,
                ProbeMethod::Get => classifier.classify_get(target).await,
            }
        };

        let result = tokio::select! {
            result = probe => result,
            _ = tokio::signal::ctrl_c() => {
                println!();
                println!("⚠️  Scan interrupted ({} of {} targets checked)", i, targets.len());
                scan.interrupted = true;
                return scan;
            }
        };

        println!("{}", report::status_line(&result));
        scan.push(result);

        if i + 1 < targets.len() {
            sleep(config.inter_request_delay()).await;
        }
    }

    scan
}
