//! Cachestore host - runs the process-wide cache with its GC sweep
//!
//! Demonstrates the intended lifecycle: the sweep is launched once at
//! startup and cancelled at shutdown.

use std::time::Duration;

use anyhow::Context;
use cachestore::cache::global;
use cachestore::{spawn_gc_sweep, SetOptions, StoreConfig};
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the cache host.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Seed the process-wide store with a few sample items
/// 4. Start background GC sweep
/// 5. Wait for SIGINT/SIGTERM, then cancel the sweep and wait for it
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cachestore=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cachestore host");

    let config = StoreConfig::from_env();
    info!(
        "Configuration loaded: gc_interval={:?}, disabled={}",
        config.gc_interval, config.disabled
    );

    let store = global::default_store();
    store.set("greeting", String::from("hello"), None);
    store.set(
        "session:demo",
        42u64,
        Some(SetOptions::tagged("sessions").with_ttl(Duration::from_secs(5))),
    );
    info!("Seeded {} items", store.len());

    let cancel = CancellationToken::new();
    let sweep = spawn_gc_sweep(store.clone(), cancel.clone(), config.gc_interval);
    if sweep.is_none() {
        warn!("GC sweep disabled; expired items are only reclaimed by explicit gc calls");
    }

    shutdown_signal().await?;

    cancel.cancel();
    if let Some(handle) = sweep {
        handle.await.context("GC sweep task panicked")?;
    }

    info!("Shutdown complete with {} items in memory", store.len());
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() -> anyhow::Result<()> {
    let ctrl_c = async { signal::ctrl_c().await.context("Failed to install Ctrl+C handler") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<(), anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<anyhow::Result<()>>();

    tokio::select! {
        result = ctrl_c => {
            result?;
            info!("Received Ctrl+C, initiating shutdown...");
        }
        result = terminate => {
            result?;
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    Ok(())
}
