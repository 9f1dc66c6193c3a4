//! Server binary for the school announcement feed.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `schoolfeed-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing)
//! 3. Open the configured document store (memory or Dragonfly)
//! 4. Serve the HTTP API until `Ctrl-C`

mod error;

use std::sync::Arc;

use schoolfeed_api::{AppState, ServerConfig};
use schoolfeed_core::config::LoggingConfig;
use schoolfeed_core::{FeedConfig, StoreKind};
use schoolfeed_db::{DragonflyStore, MemoryStore, StoreBackend};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::StartupError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, the store connection or the server
/// fails.
#[tokio::main]
async fn main() -> Result<(), StartupError> {
    // 1. Load configuration.
    let config = FeedConfig::load()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!(
        host = %config.server.host,
        port = config.server.port,
        backend = ?config.store.backend,
        "schoolfeed-server starting"
    );

    // 3. Open the document store.
    let store = open_store(&config).await?;
    info!(backend = store.name(), "Document store ready");

    // 4. Serve.
    let state = Arc::new(AppState::new(store));
    schoolfeed_api::start_server(&ServerConfig::from(&config.server), state).await?;

    info!("schoolfeed-server shutdown complete");
    Ok(())
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level when set.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Build the store selected by `store.backend`.
async fn open_store(config: &FeedConfig) -> Result<StoreBackend, StartupError> {
    let settings = &config.store;
    match settings.backend {
        StoreKind::Memory => Ok(MemoryStore::new().into()),
        StoreKind::Dragonfly => {
            info!(url = %settings.dragonfly_url, "Connecting to Dragonfly");
            let store = DragonflyStore::connect(
                &settings.dragonfly_url,
                &settings.namespace,
                settings.request_timeout(),
            )
            .await?;
            Ok(store.into())
        }
    }
}
