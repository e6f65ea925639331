//! Per-account lock registry.
//!
//! One exclusive section per account id, created lazily on first use
//! (first insert wins) and never removed, since accounts are never deleted.
//! Two-account operations acquire both locks in ascending id order, so two
//! transfers over the same pair in opposite directions cannot deadlock.

use std::sync::Arc;
use std::time::Duration;

use cambio_shared::AccountId;
use dashmap::DashMap;
use parking_lot::{Mutex, MutexGuard};
use tracing::{debug, warn};

use super::error::LedgerError;

/// Registry of per-account exclusive locks.
#[derive(Debug, Default)]
pub(crate) struct LockRegistry {
    locks: DashMap<AccountId, Arc<Mutex<()>>>,
    timeout: Option<Duration>,
}

impl LockRegistry {
    pub(crate) fn new(timeout: Option<Duration>) -> Self {
        Self {
            locks: DashMap::new(),
            timeout,
        }
    }

    /// Runs `f` while holding the lock for `id`.
    pub(crate) fn with_account<T>(
        &self,
        id: &AccountId,
        f: impl FnOnce() -> Result<T, LedgerError>,
    ) -> Result<T, LedgerError> {
        let handle = self.handle(id);
        let _guard = self.acquire(id, &handle)?;
        f()
    }

    /// Runs `f` while holding the locks for both `a` and `b`.
    ///
    /// Locks are taken in ascending id order regardless of argument order and
    /// released in reverse.
    pub(crate) fn with_pair<T>(
        &self,
        a: &AccountId,
        b: &AccountId,
        f: impl FnOnce() -> Result<T, LedgerError>,
    ) -> Result<T, LedgerError> {
        if a == b {
            return Err(LedgerError::SameAccountTransfer(a.clone()));
        }
        let (first, second) = if a < b { (a, b) } else { (b, a) };
        debug!(first = %first, second = %second, "Acquiring account locks");

        let first_handle = self.handle(first);
        let second_handle = self.handle(second);
        let _first = self.acquire(first, &first_handle)?;
        let _second = self.acquire(second, &second_handle)?;
        f()
    }

    /// Number of ids that have a lock.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.locks.len()
    }

    fn handle(&self, id: &AccountId) -> Arc<Mutex<()>> {
        if let Some(existing) = self.locks.get(id) {
            return Arc::clone(existing.value());
        }
        Arc::clone(
            self.locks
                .entry(id.clone())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .value(),
        )
    }

    fn acquire<'a>(
        &self,
        id: &AccountId,
        handle: &'a Mutex<()>,
    ) -> Result<MutexGuard<'a, ()>, LedgerError> {
        match self.timeout {
            None => Ok(handle.lock()),
            Some(timeout) => handle.try_lock_for(timeout).ok_or_else(|| {
                warn!(account_id = %id, timeout_ms = timeout.as_millis(), "Timed out waiting for account lock");
                LedgerError::Busy { id: id.clone() }
            }),
        }
    }
}
