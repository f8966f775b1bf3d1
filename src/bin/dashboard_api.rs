//! Dashboard API Server
//!
//! Entrypoint for the loopback sync API. The probe configuration and the
//! repository list come from the same tracking config as the CLI scanners.

use std::sync::Arc;

use anyhow::Result;

use check_pages::config::{root_dir, ScannerConfig};
use check_pages::server::{self, AppState, DEFAULT_PORT};
use check_pages::{report, storage};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let root = root_dir();
    let targets_file = storage::load_targets(&root)?;

    let config = ScannerConfig::new(&targets_file.platform_username).with_env_token();
    let state = Arc::new(AppState::new(config, targets_file.repos.clone())?);

    report::banner("🚀 DASHBOARD API SERVER");
    println!("📡 Starting on: http://127.0.0.1:{}", DEFAULT_PORT);
    println!("🔗 Available endpoints:");
    println!("   - GET /api/health - API status");
    println!("   - GET /api/custom-domains - Detected custom domains");
    println!("   - GET /api/sync-github - Full synchronization");
    println!();

    server::serve(state, DEFAULT_PORT).await
}

fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}
