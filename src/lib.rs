//! # Vendor News
//!
//! News search proxy for the wedding vendor directory. The frontend asks for
//! press coverage of a vendor; this service queries the Google News RSS search
//! feed, extracts the items and returns them as normalized JSON.
//!
//! ## Endpoints
//!
//! | Route | Description |
//! |-------|-------------|
//! | `GET /api/news/search?q=<text>` | Up to ten articles for `q` plus the regional suffix |
//! | `GET /healthz` | Liveness probe |
//!
//! ## Response contract
//!
//! - Missing `q`: `400 {"error": "q parameter is required"}`
//! - Success or upstream error status: `200 {"articles": [...], "query": "..."}`
//!   with `Cache-Control: public, max-age=1800`
//! - Transport or internal failure: `200 {"articles": [], "error": "..."}`,
//!   never a 5xx
//!
//! ## Architecture
//!
//! 1. **Routing** ([`routes`]): validate `q`, shape the response
//! 2. **Fetching** ([`upstream`]): one GET to the feed with a browser user agent
//! 3. **Extraction** ([`feed`]): stream `<item>` blocks out of the RSS document
//! 4. **Normalization** ([`normalize`]): split source, strip markup, find images

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::get,
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

pub mod cli;
pub mod config;
pub mod error;
pub mod feed;
pub mod models;
pub mod normalize;
pub mod routes;
pub mod search;
pub mod state;
pub mod upstream;
pub mod utils;

use routes::{health_handler, news_search_handler};
use state::AppState;

/// Build the application router around shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/news/search", get(news_search_handler))
        .route("/healthz", get(health_handler))
        .layer(cors)
        .with_state(state)
}

/// Serve on an already bound listener until the future resolves.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Bind `address` and serve until Ctrl+C or SIGTERM.
pub async fn start_server(state: Arc<AppState>, address: SocketAddr) -> std::io::Result<()> {
    info!(%address, "Binding");
    let listener = TcpListener::bind(address).await?;
    info!(%address, "Server running");

    serve_with_shutdown(listener, state, shutdown_signal()).await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
