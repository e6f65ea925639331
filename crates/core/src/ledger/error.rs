//! Ledger error types.
//!
//! Every failure of an exchange, transfer, registration, or status change is
//! surfaced to the caller as one of these variants. Nothing is retried
//! inside the engine.

use cambio_shared::{AccountId, CurrencyCode};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::account::AccountStatus;
use crate::store::StoreError;

/// Details of a transfer whose debit leg is durable but whose credit leg is
/// not, and whose compensating rollback also failed.
#[derive(Debug)]
pub struct PartialTransfer {
    /// Debited account; its record holds the post-transfer balance.
    pub from: AccountId,
    /// Credited account; its record was not updated.
    pub to: AccountId,
    /// Transferred currency.
    pub currency: CurrencyCode,
    /// Transferred amount.
    pub amount: Decimal,
    /// Why the credit leg failed.
    pub credit_error: StoreError,
    /// Why restoring the debited account failed.
    pub rollback_error: StoreError,
}

impl std::fmt::Display for PartialTransfer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} debited from {} but not credited to {} (credit: {}; rollback: {})",
            self.amount, self.currency, self.from, self.to, self.credit_error, self.rollback_error
        )
    }
}

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Account Errors ==========
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Account id is already registered.
    #[error("Account already exists: {0}")]
    AccountAlreadyExists(AccountId),

    /// Operation attempted on a frozen or closed account.
    #[error("Account {id} is {status} and cannot perform operations")]
    AccountStatusInvalid {
        /// The account ID.
        id: AccountId,
        /// Its current status.
        status: AccountStatus,
    },

    /// Requested status change is not a legal transition.
    #[error("Account {id} cannot move from {from} to {to}")]
    InvalidStatusTransition {
        /// The account ID.
        id: AccountId,
        /// Current status.
        from: AccountStatus,
        /// Requested status.
        to: AccountStatus,
    },

    // ========== Funds Errors ==========
    /// Source balance is missing or smaller than the amount.
    #[error("Insufficient {currency} funds in account {id}. Required: {required}, Available: {available}")]
    InsufficientFunds {
        /// The account ID.
        id: AccountId,
        /// Currency debited.
        currency: CurrencyCode,
        /// Amount requested.
        required: Decimal,
        /// Amount held.
        available: Decimal,
    },

    /// Amount must be positive.
    #[error("Amount must be positive, got {0}")]
    InvalidAmount(Decimal),

    /// Transfer source and destination are the same account.
    #[error("Cannot transfer from account {0} to itself")]
    SameAccountTransfer(AccountId),

    /// Decimal arithmetic overflowed.
    #[error("Arithmetic overflow while computing balance")]
    ArithmeticOverflow,

    // ========== Currency Errors ==========
    /// No exchange rate registered for the pair.
    #[error("Exchange rate not found for pair: {from}-{to}")]
    RateNotFound {
        /// Source currency code.
        from: CurrencyCode,
        /// Target currency code.
        to: CurrencyCode,
    },

    /// Exchange rate must be positive.
    #[error("Exchange rate must be positive, got {0}")]
    InvalidRate(Decimal),

    // ========== Concurrency Errors ==========
    /// Timed out waiting for an account lock.
    #[error("Account {id} is busy, please retry")]
    Busy {
        /// The contended account.
        id: AccountId,
    },

    // ========== Storage Errors ==========
    /// Storage read or write failed; no balance changed.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// Transfer left the debit durable without the credit.
    #[error("Partial transfer failure: {0}")]
    PartialTransferFailure(Box<PartialTransfer>),
}

impl LedgerError {
    /// Returns a stable machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::AccountAlreadyExists(_) => "ACCOUNT_ALREADY_EXISTS",
            Self::AccountStatusInvalid { .. } => "ACCOUNT_STATUS_INVALID",
            Self::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::SameAccountTransfer(_) => "SAME_ACCOUNT_TRANSFER",
            Self::ArithmeticOverflow => "ARITHMETIC_OVERFLOW",
            Self::RateNotFound { .. } => "RATE_NOT_FOUND",
            Self::InvalidRate(_) => "INVALID_RATE",
            Self::Busy { .. } => "BUSY",
            Self::Storage(_) => "IO_FAILURE",
            Self::PartialTransferFailure(_) => "PARTIAL_TRANSFER_FAILURE",
        }
    }

    /// Returns true if the caller may retry the same request unchanged.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Busy { .. })
    }
}
