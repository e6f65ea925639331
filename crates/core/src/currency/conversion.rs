//! Currency conversion logic.
//!
//! Converted amounts are the exact decimal product `amount * rate`; no
//! rounding is applied here. Rounding happens only when an inverse rate is
//! derived at registration time.

use rust_decimal::Decimal;

use crate::ledger::LedgerError;

/// Converts an amount using the given exchange rate.
///
/// # Errors
///
/// Returns `ArithmeticOverflow` if the product does not fit in a `Decimal`.
pub fn convert_amount(amount: Decimal, rate: Decimal) -> Result<Decimal, LedgerError> {
    amount
        .checked_mul(rate)
        .ok_or(LedgerError::ArithmeticOverflow)
}
