//! Ledger configuration and operation receipts.

use std::time::Duration;

use cambio_shared::config::LedgerSettings;
use cambio_shared::{AccountId, CurrencyCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ledger engine configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Maximum wait for an account lock; `None` waits indefinitely.
    pub lock_timeout: Option<Duration>,
}

impl LedgerConfig {
    /// Sets the lock wait bound.
    #[must_use]
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = Some(timeout);
        self
    }
}

impl From<&LedgerSettings> for LedgerConfig {
    fn from(settings: &LedgerSettings) -> Self {
        Self {
            lock_timeout: settings.lock_timeout(),
        }
    }
}

/// Outcome of a successful exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeReceipt {
    /// Account exchanged on.
    pub account_id: AccountId,
    /// Debited currency.
    pub from_currency: CurrencyCode,
    /// Credited currency.
    pub to_currency: CurrencyCode,
    /// Amount debited from `from_currency`.
    pub debited: Decimal,
    /// Amount credited to `to_currency`; zero for a same-currency debit.
    pub credited: Decimal,
    /// Rate applied, `None` for a same-currency debit.
    pub rate: Option<Decimal>,
}

/// Outcome of a successful transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    /// Debited account.
    pub from: AccountId,
    /// Credited account.
    pub to: AccountId,
    /// Transferred currency.
    pub currency: CurrencyCode,
    /// Transferred amount.
    pub amount: Decimal,
}
