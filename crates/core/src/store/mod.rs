//! Durable account storage.
//!
//! One record per account id, replaced wholesale on every write. Stores do
//! not take locks of their own: every writer runs inside the ledger's
//! per-account section, and each backend makes a single `store` atomic with
//! respect to `load` on the same id so lock-free readers never observe a
//! torn record.
//!
//! - `InMemoryAccountStore` - process-local map (tests, demo)
//! - `FileAccountStore` - one JSON file per account with atomic replace

mod error;
mod file;
mod memory;

use cambio_shared::AccountId;

use crate::account::Account;

pub use error::StoreError;
pub use file::FileAccountStore;
pub use memory::InMemoryAccountStore;

/// Keyed durable storage of account records.
pub trait AccountStore: Send + Sync {
    /// Returns a fresh copy of the account, or `None` if it does not exist.
    fn load(&self, id: &AccountId) -> Result<Option<Account>, StoreError>;

    /// Persists the full record, replacing any prior version.
    fn store(&self, account: &Account) -> Result<(), StoreError>;
}
