//! # Notify Runtime
//!
//! The main entry point for the notify exchange service.
//!
//! ## Startup Sequence
//!
//! 1. Initialise tracing (RUST_LOG filter, `info` default)
//! 2. Load configuration from the environment
//! 3. Open the RocksDB notification store
//! 4. Construct the manager (fails fast if the store is unreachable)
//! 5. Serve the inbox until ctrl-c

mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use notify_inbox::{build_router, HttpDeliverySink, NotificationManager};
use notify_store::{RocksDbConfig, RocksDbStore};

use crate::config::RuntimeConfig;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = RuntimeConfig::from_env()?;
    info!(id = %config.manager.id, inbox = %config.manager.inbox_url, "starting notify runtime");

    let store = Arc::new(
        RocksDbStore::open(RocksDbConfig {
            path: config.data_dir.clone(),
            ..Default::default()
        })
        .with_context(|| format!("failed to open notification store at {}", config.data_dir))?,
    );

    let delivery =
        Arc::new(HttpDeliverySink::new(&config.manager).context("failed to build delivery client")?);

    let manager = Arc::new(
        NotificationManager::new(config.manager.clone(), store, delivery)
            .context("failed to construct notification manager")?,
    );

    let router = build_router(manager);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "inbox listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("inbox server error")?;

    info!("notify runtime stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received shutdown signal");
    }
}
