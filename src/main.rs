//! Fetcher - periodic web page polling service
//!
//! Registered URLs are fetched on their own interval and every attempt is
//! kept in an in-memory history, exposed over a small JSON API.

mod config;
mod probe;
mod scheduler;
mod storage;
mod web;

use config::ServerConfig;
use probe::HttpProbe;
use storage::Store;
use web::Server;

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("webfetcher=info".parse()?))
        .init();

    // Load configuration
    let cfg = ServerConfig::load();
    tracing::info!("Starting fetcher on port {}...", cfg.http_port);

    let probe = HttpProbe::new(cfg.fetch_timeout)?;
    tracing::info!("Fetch timeout is {:?}", probe.timeout());

    let store = Arc::new(Store::new(probe));

    let server = Server::new(cfg, store.clone());
    server.start(shutdown_signal(store)).await?;

    Ok(())
}

/// Resolve on Ctrl-C after stopping every poller.
async fn shutdown_signal(store: Arc<Store>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }

    let stopped = store.shutdown();
    tracing::info!("Shutting down, stopped {} pollers", stopped);
}
