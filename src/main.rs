//! # Vendor News
//!
//! HTTP server for the vendor news search proxy.
//!
//! ## Usage
//!
//! ```sh
//! RUST_LOG=vendor_news=debug vendor_news --port 8788
//! ```

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use vendor_news::{cli::Cli, start_server, state::AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "vendor_news starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };
    info!(
        upstream = %config.upstream_base_url,
        query_suffix = %config.query_suffix,
        max_articles = config.max_articles,
        timeout_secs = config.request_timeout_secs,
        "Configuration loaded"
    );

    let state = AppState::new(config)?;

    if let Err(e) = start_server(state, args.socket_addr()).await {
        error!(error = %e, "Server failed");
        return Err(e.into());
    }

    Ok(())
}
