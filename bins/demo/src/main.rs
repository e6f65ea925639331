//! Cambio demo load driver
//!
//! Sets up the demo exchange rates and accounts, then drives concurrent
//! exchanges, transfers, balance queries and status changes through the
//! ledger engine.

mod scenario;

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cambio_core::{AccountStore, FileAccountStore, InMemoryAccountStore, LedgerConfig, LedgerService};
use cambio_shared::AppConfig;
use cambio_shared::config::{StorageBackend, StorageConfig};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cambio=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let store = open_store(&config.storage)?;
    let ledger = Arc::new(LedgerService::with_config(
        store,
        LedgerConfig::from(&config.ledger),
    ));

    scenario::run(&ledger, &config.demo)?;

    info!("Demo completed");
    Ok(())
}

fn open_store(config: &StorageConfig) -> anyhow::Result<Arc<dyn AccountStore>> {
    match config.backend {
        StorageBackend::File => {
            let store = FileAccountStore::open(&config.root).with_context(|| {
                format!("Failed to open account store at {}", config.root.display())
            })?;
            info!(path = %store.root().display(), "Using file account store");
            Ok(Arc::new(store))
        }
        StorageBackend::Memory => {
            info!("Using in-memory account store");
            Ok(Arc::new(InMemoryAccountStore::new()))
        }
    }
}
