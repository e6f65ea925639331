//! Concurrency-safe ledger mutation.
//!
//! This module implements the mutation engine:
//! - Per-account lock registry with ordered two-account acquisition
//! - Exchange within one account at a registered rate
//! - Same-currency transfer between two accounts with compensation on
//!   partial write failure
//! - Error taxonomy for all ledger operations

pub mod error;
mod locks;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::{LedgerError, PartialTransfer};
pub use service::LedgerService;
pub use types::{ExchangeReceipt, LedgerConfig, TransferReceipt};
