//! Account status transitions and balance queries.

use std::sync::Arc;

use cambio_shared::{AccountId, CurrencyCode};
use rust_decimal::Decimal;
use tracing::info;

use crate::account::{Account, AccountStatus};
use crate::ledger::{LedgerError, LedgerService};

/// Administrative operations over the accounts of a [`LedgerService`].
///
/// Shares the ledger's store and lock registry, so a status change is
/// serialized with every exchange or transfer touching the same account.
#[derive(Clone)]
pub struct AccountAdmin {
    ledger: Arc<LedgerService>,
}

impl AccountAdmin {
    /// Creates an admin facade over `ledger`.
    #[must_use]
    pub fn new(ledger: Arc<LedgerService>) -> Self {
        Self { ledger }
    }

    /// Freezes an active account.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if the account does not exist
    /// - `InvalidStatusTransition` unless the account is `ACTIVE`
    /// - `Busy`, `Storage` as for any locked mutation
    pub fn freeze(&self, id: &AccountId) -> Result<Account, LedgerError> {
        self.transition(id, AccountStatus::Frozen)
    }

    /// Returns a frozen account to active.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if the account does not exist
    /// - `InvalidStatusTransition` unless the account is `FROZEN`
    /// - `Busy`, `Storage` as for any locked mutation
    pub fn unfreeze(&self, id: &AccountId) -> Result<Account, LedgerError> {
        self.transition(id, AccountStatus::Active)
    }

    /// Permanently closes a frozen account.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if the account does not exist
    /// - `InvalidStatusTransition` unless the account is `FROZEN`
    /// - `Busy`, `Storage` as for any locked mutation
    pub fn close(&self, id: &AccountId) -> Result<Account, LedgerError> {
        self.transition(id, AccountStatus::Closed)
    }

    /// Balance of `currency` in the account, `None` if either is absent.
    ///
    /// Takes no lock: the store never exposes a half-written record.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the record cannot be read.
    pub fn get_balance(
        &self,
        id: &AccountId,
        currency: &CurrencyCode,
    ) -> Result<Option<Decimal>, LedgerError> {
        self.ledger.balance(id, currency)
    }

    fn transition(&self, id: &AccountId, next: AccountStatus) -> Result<Account, LedgerError> {
        let (previous, account) = self.ledger.mutate_account(id, |account| {
            let previous = account.status;
            if !previous.can_transition_to(next) {
                return Err(LedgerError::InvalidStatusTransition {
                    id: id.clone(),
                    from: previous,
                    to: next,
                });
            }
            account.status = next;
            Ok((previous, account.clone()))
        })?;

        info!(
            account_id = %id,
            from = %previous,
            to = %next,
            "Account {id} changed status from {previous} to {next}"
        );
        Ok(account)
    }
}
