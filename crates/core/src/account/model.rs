//! Account record.
//!
//! An account is persisted wholesale: every mutation rewrites the full
//! snapshot (id, owner, status, balances). Balances are exact decimals and
//! never go below zero.

use std::collections::BTreeMap;

use cambio_shared::{AccountId, CurrencyCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::LedgerError;

/// Account lifecycle status.
///
/// Legal transitions: `Active -> Frozen`, `Frozen -> Active`,
/// `Frozen -> Closed`. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    /// Balances may be mutated.
    #[default]
    Active,
    /// Temporarily blocked; balances are read-only.
    Frozen,
    /// Permanently closed.
    Closed,
}

impl AccountStatus {
    /// Returns true if moving from `self` to `next` is a legal transition.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Active, Self::Frozen) | (Self::Frozen, Self::Active | Self::Closed)
        )
    }
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::Frozen => write!(f, "FROZEN"),
            Self::Closed => write!(f, "CLOSED"),
        }
    }
}

/// A multi-currency ledger account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique, immutable account id.
    pub id: AccountId,
    /// Display name of the owner.
    pub owner_name: String,
    /// Lifecycle status.
    #[serde(default)]
    pub status: AccountStatus,
    /// Balance per currency.
    #[serde(default)]
    pub balances: BTreeMap<CurrencyCode, Decimal>,
}

impl Account {
    /// Creates an active account with no balances.
    #[must_use]
    pub fn new(id: AccountId, owner_name: impl Into<String>) -> Self {
        Self {
            id,
            owner_name: owner_name.into(),
            status: AccountStatus::Active,
            balances: BTreeMap::new(),
        }
    }

    /// Returns the balance held in `currency`, if an entry exists.
    #[must_use]
    pub fn balance(&self, currency: &CurrencyCode) -> Option<Decimal> {
        self.balances.get(currency).copied()
    }

    /// Returns true if balances may be mutated.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    /// Fails with `AccountStatusInvalid` unless the account is active.
    pub fn ensure_active(&self) -> Result<(), LedgerError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(LedgerError::AccountStatusInvalid {
                id: self.id.clone(),
                status: self.status,
            })
        }
    }

    /// Fails with `InsufficientFunds` unless at least `amount` of `currency` is held.
    pub fn ensure_funds(&self, currency: &CurrencyCode, amount: Decimal) -> Result<(), LedgerError> {
        match self.balance(currency) {
            Some(available) if available >= amount => Ok(()),
            available => Err(LedgerError::InsufficientFunds {
                id: self.id.clone(),
                currency: currency.clone(),
                required: amount,
                available: available.unwrap_or(Decimal::ZERO),
            }),
        }
    }

    /// Subtracts `amount` from `currency`, refusing to go below zero.
    pub(crate) fn debit(&mut self, currency: &CurrencyCode, amount: Decimal) -> Result<(), LedgerError> {
        self.ensure_funds(currency, amount)?;
        let entry = self.balances.entry(currency.clone()).or_insert(Decimal::ZERO);
        *entry = entry
            .checked_sub(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Adds `amount` to `currency`, creating the entry at zero first if absent.
    pub(crate) fn credit(&mut self, currency: &CurrencyCode, amount: Decimal) -> Result<(), LedgerError> {
        let entry = self.balances.entry(currency.clone()).or_insert(Decimal::ZERO);
        *entry = entry
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        Ok(())
    }
}
