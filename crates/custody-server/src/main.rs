//! Custody server entry point: opens the configured key-value backend,
//! wires it into the commitment store, and serves the three HTTP
//! endpoints until a shutdown signal is received.

mod config;
mod error;
mod routes;
mod shutdown;

use anyhow::Context;
use config::{Config, DbEngine};
use custody_kv::{KvStore, MemoryStore, SledStore};
use custody_store::CommitmentStore;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.log_level))
        .init();

    let kv: Box<dyn KvStore> = match config.db_engine {
        DbEngine::Sled => {
            Box::new(SledStore::open(&config.db_path).context("opening sled database")?)
        }
        DbEngine::Memory => Box::new(MemoryStore::new()),
        DbEngine::Scylla => {
            anyhow::bail!(
                "DB_ENGINE=scylla requested (hosts: {:?}) but this build has no Scylla driver",
                config.scylla_hosts
            );
        }
    };

    let store = Arc::new(CommitmentStore::new(kv));
    let app = routes::router(store.clone()).layer(TraceLayer::new_for_http());

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;

    tracing::info!(addr = %bind_addr, "server is running");

    let serve_task = tokio::spawn(async move {
        axum::serve(listener, app.into_make_service())
            .with_graceful_shutdown(shutdown::signal_received())
            .await
    });

    // A second, independent wait for the same signal: the one above only
    // tells axum to stop accepting new connections and start draining.
    // This one starts our own grace-period clock.
    shutdown::signal_received().await;
    let grace = shutdown::grace_period();
    tracing::info!(?grace, "waiting for in-flight requests to drain");

    match tokio::time::timeout(grace, serve_task).await {
        Ok(Ok(Ok(()))) => tracing::info!("server stopped cleanly"),
        Ok(Ok(Err(err))) => tracing::error!(%err, "server error"),
        Ok(Err(join_err)) => tracing::error!(%join_err, "server task panicked"),
        Err(_) => tracing::error!("server forced to shutdown after grace period"),
    }

    store.close().context("closing key-value store")?;
    tracing::warn!("server gracefully stopped");

    Ok(())
}
