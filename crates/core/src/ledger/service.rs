//! Ledger service: exchange and transfer under per-account locks.
//!
//! Every mutation follows the same cycle while holding the account lock(s):
//! load a fresh copy, validate, mutate the copy, persist it. A failure at
//! any step before the write leaves the stored record untouched, and the
//! lock is released on every exit path.

use std::sync::Arc;

use cambio_shared::{AccountId, CurrencyCode};
use rust_decimal::Decimal;
use tracing::{error, info, warn};

use super::error::{LedgerError, PartialTransfer};
use super::locks::LockRegistry;
use super::types::{ExchangeReceipt, LedgerConfig, TransferReceipt};
use crate::account::Account;
use crate::currency::{ExchangeRate, RateTable, convert_amount};
use crate::store::AccountStore;

/// Orchestrates exchanges and transfers over an [`AccountStore`].
///
/// The service owns the only lock layer: the store is always called from
/// inside the section for the account(s) it touches.
pub struct LedgerService {
    store: Arc<dyn AccountStore>,
    rates: RateTable,
    locks: LockRegistry,
}

impl LedgerService {
    /// Creates a service with default configuration (unbounded lock waits).
    #[must_use]
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self::with_config(store, LedgerConfig::default())
    }

    /// Creates a service with the given configuration.
    #[must_use]
    pub fn with_config(store: Arc<dyn AccountStore>, config: LedgerConfig) -> Self {
        Self {
            store,
            rates: RateTable::new(),
            locks: LockRegistry::new(config.lock_timeout),
        }
    }

    /// The exchange-rate table used by [`exchange`](Self::exchange).
    #[must_use]
    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Registers a new active account with the given opening balances.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if an opening balance is negative
    /// - `AccountAlreadyExists` if the id is taken
    /// - `Storage` if the record cannot be read or written
    pub fn register_account(
        &self,
        id: AccountId,
        owner_name: impl Into<String>,
        initial_balances: impl IntoIterator<Item = (CurrencyCode, Decimal)>,
    ) -> Result<Account, LedgerError> {
        let mut account = Account::new(id, owner_name);
        for (currency, amount) in initial_balances {
            if amount < Decimal::ZERO {
                return Err(LedgerError::InvalidAmount(amount));
            }
            account.credit(&currency, amount)?;
        }

        self.locks.with_account(&account.id, || {
            if self.store.load(&account.id)?.is_some() {
                return Err(LedgerError::AccountAlreadyExists(account.id.clone()));
            }
            self.persist(&account)
        })?;

        info!(
            account_id = %account.id,
            owner = %account.owner_name,
            currencies = account.balances.len(),
            "Registered new account"
        );
        Ok(account)
    }

    /// Registers `from -> to = rate` and its rounded inverse.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRate` if `rate` is not positive.
    pub fn register_rate(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
        rate: Decimal,
    ) -> Result<ExchangeRate, LedgerError> {
        self.rates.register(from, to, rate)
    }

    /// Converts `amount` of `from` into `to` within one account.
    ///
    /// When `from == to` the call is a plain debit with no credit leg and
    /// does not consult the rate table.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount <= 0`
    /// - `AccountNotFound`, `AccountStatusInvalid`
    /// - `InsufficientFunds` if the `from` balance is missing or too small
    /// - `RateNotFound` if the pair has no registered rate
    /// - `Busy` if the account lock wait timed out
    /// - `Storage` on read/write failure (balances unchanged)
    pub fn exchange(
        &self,
        account_id: &AccountId,
        from: &CurrencyCode,
        to: &CurrencyCode,
        amount: Decimal,
    ) -> Result<ExchangeReceipt, LedgerError> {
        ensure_positive(amount)?;

        let receipt = self.mutate_account(account_id, |account| {
            account.ensure_active()?;
            account.ensure_funds(from, amount)?;

            let (credited, rate) = if from == to {
                account.debit(from, amount)?;
                (Decimal::ZERO, None)
            } else {
                let rate = self.rates.lookup(from, to)?;
                let converted = convert_amount(amount, rate)?;
                account.debit(from, amount)?;
                account.credit(to, converted)?;
                (converted, Some(rate))
            };

            Ok(ExchangeReceipt {
                account_id: account_id.clone(),
                from_currency: from.clone(),
                to_currency: to.clone(),
                debited: amount,
                credited,
                rate,
            })
        })?;

        info!(
            account_id = %account_id,
            from_currency = %from,
            to_currency = %to,
            amount = %amount,
            converted = %receipt.credited,
            "Exchanged {amount} {from} to {} {to}",
            receipt.credited
        );
        Ok(receipt)
    }

    /// Moves `amount` of `currency` from one account to another.
    ///
    /// Both account locks are held, in ascending id order, for the whole
    /// load-validate-mutate-persist span. If the credit write fails the
    /// debited account is restored from its pre-transfer snapshot; only if
    /// that restore also fails is `PartialTransferFailure` returned.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount <= 0`
    /// - `SameAccountTransfer` if `from_id == to_id`
    /// - `AccountNotFound`, `AccountStatusInvalid` for either account
    /// - `InsufficientFunds` if the source cannot cover `amount`
    /// - `Busy` if a lock wait timed out
    /// - `Storage` if a write failed and no balance changed
    /// - `PartialTransferFailure` if the debit is durable but the credit is not
    pub fn transfer(
        &self,
        from_id: &AccountId,
        to_id: &AccountId,
        currency: &CurrencyCode,
        amount: Decimal,
    ) -> Result<TransferReceipt, LedgerError> {
        ensure_positive(amount)?;
        if from_id == to_id {
            return Err(LedgerError::SameAccountTransfer(from_id.clone()));
        }

        self.locks.with_pair(from_id, to_id, || {
            let mut from = self.load_existing(from_id)?;
            let mut to = self.load_existing(to_id)?;

            from.ensure_active()?;
            to.ensure_active()?;
            from.ensure_funds(currency, amount)?;

            let snapshot = from.clone();
            from.debit(currency, amount)?;
            to.credit(currency, amount)?;

            self.persist_transfer(&snapshot, &from, &to, currency, amount)
        })?;

        info!(
            from_account = %from_id,
            to_account = %to_id,
            currency = %currency,
            amount = %amount,
            "Transferred {amount} {currency} from account {from_id} to account {to_id}"
        );
        Ok(TransferReceipt {
            from: from_id.clone(),
            to: to_id.clone(),
            currency: currency.clone(),
            amount,
        })
    }

    /// Lock-free snapshot of an account.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the record cannot be read.
    pub fn account(&self, id: &AccountId) -> Result<Option<Account>, LedgerError> {
        Ok(self.store.load(id)?)
    }

    /// Lock-free read of one balance; `None` if the account or the currency
    /// entry does not exist.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the record cannot be read.
    pub fn balance(
        &self,
        id: &AccountId,
        currency: &CurrencyCode,
    ) -> Result<Option<Decimal>, LedgerError> {
        Ok(self.account(id)?.and_then(|account| account.balance(currency)))
    }

    /// Runs `f` on a fresh copy of the account under its lock and persists
    /// the copy if `f` succeeds.
    pub(crate) fn mutate_account<T>(
        &self,
        id: &AccountId,
        f: impl FnOnce(&mut Account) -> Result<T, LedgerError>,
    ) -> Result<T, LedgerError> {
        self.locks.with_account(id, || {
            let mut account = self.load_existing(id)?;
            let outcome = f(&mut account)?;
            self.persist(&account)?;
            Ok(outcome)
        })
    }

    fn load_existing(&self, id: &AccountId) -> Result<Account, LedgerError> {
        self.store
            .load(id)
            .inspect_err(|err| warn!(account_id = %id, error = %err, "Failed to load account"))?
            .ok_or_else(|| LedgerError::AccountNotFound(id.clone()))
    }

    fn persist(&self, account: &Account) -> Result<(), LedgerError> {
        self.store
            .store(account)
            .inspect_err(|err| warn!(account_id = %account.id, error = %err, "Failed to save account"))?;
        Ok(())
    }

    fn persist_transfer(
        &self,
        original_from: &Account,
        from: &Account,
        to: &Account,
        currency: &CurrencyCode,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        self.persist(from)?;

        let Err(credit_error) = self.store.store(to) else {
            return Ok(());
        };

        match self.store.store(original_from) {
            Ok(()) => {
                warn!(
                    from_account = %from.id,
                    to_account = %to.id,
                    error = %credit_error,
                    "Credit leg failed, debit rolled back"
                );
                Err(LedgerError::Storage(credit_error))
            }
            Err(rollback_error) => {
                error!(
                    from_account = %from.id,
                    to_account = %to.id,
                    currency = %currency,
                    amount = %amount,
                    credit_error = %credit_error,
                    rollback_error = %rollback_error,
                    "Transfer left debit without credit; manual reconciliation required"
                );
                Err(LedgerError::PartialTransferFailure(Box::new(
                    PartialTransfer {
                        from: from.id.clone(),
                        to: to.id.clone(),
                        currency: currency.clone(),
                        amount,
                        credit_error,
                        rollback_error,
                    },
                )))
            }
        }
    }
}

fn ensure_positive(amount: Decimal) -> Result<(), LedgerError> {
    if amount > Decimal::ZERO {
        Ok(())
    } else {
        Err(LedgerError::InvalidAmount(amount))
    }
}
