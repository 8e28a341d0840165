//! Cafe API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p cafe-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).

use anyhow::Context;
use cafe_common::{try_init_tracing, AppConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        error!(error = %format!("{e:#}"), "Server failed");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    info!("Starting Cafe API Server...");

    let config = AppConfig::from_env().context("failed to load configuration")?;

    info!(
        env = ?config.app.env,
        address = %config.api.address(),
        "Configuration loaded"
    );

    cafe_api::run(config).await.context("server error")?;

    Ok(())
}
