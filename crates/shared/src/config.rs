//! Application configuration management.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Account storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Ledger engine configuration.
    #[serde(default)]
    pub ledger: LedgerSettings,
    /// Demo load driver configuration.
    #[serde(default)]
    pub demo: DemoConfig,
}

/// Which account store backs the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON record per account under `storage.root`.
    #[default]
    File,
    /// Process-local map, lost on exit.
    Memory,
}

/// Account storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Storage backend.
    #[serde(default)]
    pub backend: StorageBackend,
    /// Directory holding account records (file backend only).
    #[serde(default = "default_storage_root")]
    pub root: PathBuf,
}

fn default_storage_root() -> PathBuf {
    PathBuf::from("accounts")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            root: default_storage_root(),
        }
    }
}

/// Ledger engine configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LedgerSettings {
    /// Maximum time to wait for an account lock, in milliseconds.
    /// Absent means wait indefinitely.
    #[serde(default)]
    pub lock_timeout_ms: Option<u64>,
}

impl LedgerSettings {
    /// Lock wait bound as a `Duration`.
    #[must_use]
    pub fn lock_timeout(&self) -> Option<Duration> {
        self.lock_timeout_ms.map(Duration::from_millis)
    }
}

/// Demo load driver configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DemoConfig {
    /// Number of random accounts to create.
    #[serde(default = "default_accounts")]
    pub accounts: u32,
    /// Random exchanges fired across all accounts.
    #[serde(default = "default_random_exchanges")]
    pub random_exchanges: u32,
    /// Exchanges fired concurrently against the first account.
    #[serde(default = "default_single_account_exchanges")]
    pub single_account_exchanges: u32,
    /// Random transfers between distinct accounts.
    #[serde(default = "default_transfers")]
    pub transfers: u32,
    /// Random balance lookups.
    #[serde(default = "default_balance_queries")]
    pub balance_queries: u32,
    /// Freeze/unfreeze cycles on random accounts.
    #[serde(default = "default_status_cycles")]
    pub status_cycles: u32,
}

fn default_accounts() -> u32 {
    20
}

fn default_random_exchanges() -> u32 {
    50
}

fn default_single_account_exchanges() -> u32 {
    100
}

fn default_transfers() -> u32 {
    30
}

fn default_balance_queries() -> u32 {
    10
}

fn default_status_cycles() -> u32 {
    5
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            accounts: default_accounts(),
            random_exchanges: default_random_exchanges(),
            single_account_exchanges: default_single_account_exchanges(),
            transfers: default_transfers(),
            balance_queries: default_balance_queries(),
            status_cycles: default_status_cycles(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("CAMBIO").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
