//! lib.reviews web server
//!
//! Serves thing pages, label editing, search and the editor's Ajax actions.
//! Authentication happens in a fronting proxy, which passes the signed-in
//! user's login name in the `X-Remote-User` header.
//!
//! Usage:
//!   libreviews-web --port 8080 --seed seed.json --search-url http://localhost:9200

use std::sync::Arc;
use anyhow::{Context, Result};
use clap::Parser;
use libreviews_search::SearchClient;
use libreviews_storage::{MemoryStore, Store};
use libreviews_web::{AppState, Config, build_router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    info!("lib.reviews starting...");

    let store: Arc<dyn Store> = match &config.seed {
        Some(path) => Arc::new(
            MemoryStore::open_seed(path)
                .with_context(|| format!("Failed to load seed file {}", path.display()))?,
        ),
        None => {
            warn!("No seed file given, starting with an empty store");
            Arc::new(MemoryStore::new())
        }
    };

    let search = SearchClient::new(config.search_config()).context("Invalid search configuration")?;
    if config.create_indices {
        search
            .create_indices()
            .await
            .context("Failed to create search index")?;
    }

    let app = build_router(AppState::new(store, search));
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, search_url = %config.search_url, index = %config.search_index, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("lib.reviews stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
