//! Core ledger engine for Cambio.
//!
//! This crate owns the concurrency-hard part of the system: per-account
//! locking, the load-validate-mutate-persist cycle, exchange-rate lookup and
//! inversion, and the two-account transfer protocol.
//!
//! # Modules
//!
//! - `account` - Account records and status lifecycle
//! - `currency` - Exchange rates and the rate table
//! - `store` - Durable account storage (file and in-memory)
//! - `ledger` - Exchange and transfer orchestration under account locks
//! - `admin` - Status transitions and balance queries

pub mod account;
pub mod admin;
pub mod currency;
pub mod ledger;
pub mod store;

pub use account::{Account, AccountStatus};
pub use admin::AccountAdmin;
pub use currency::{ExchangeRate, RateTable};
pub use ledger::{ExchangeReceipt, LedgerConfig, LedgerError, LedgerService, TransferReceipt};
pub use store::{AccountStore, FileAccountStore, InMemoryAccountStore, StoreError};
