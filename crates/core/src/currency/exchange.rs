//! Exchange rate types and logic.

use cambio_shared::CurrencyCode;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::ledger::LedgerError;

/// Fractional digits kept when deriving an inverse rate.
pub const INVERSE_RATE_SCALE: u32 = 6;

/// Exchange rate between two currencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Source currency code.
    pub from_currency: CurrencyCode,
    /// Target currency code.
    pub to_currency: CurrencyCode,
    /// Exchange rate (1 from_currency = rate to_currency).
    pub rate: Decimal,
}

impl ExchangeRate {
    /// Creates a new exchange rate.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRate` if `rate` is zero or negative.
    pub fn new(
        from_currency: CurrencyCode,
        to_currency: CurrencyCode,
        rate: Decimal,
    ) -> Result<Self, LedgerError> {
        if rate <= Decimal::ZERO {
            return Err(LedgerError::InvalidRate(rate));
        }
        Ok(Self {
            from_currency,
            to_currency,
            rate,
        })
    }

    /// Returns the inverse rate, `1 / rate` rounded half-up to
    /// [`INVERSE_RATE_SCALE`] fractional digits.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` if the reciprocal does not fit, or
    /// `InvalidRate` if rounding collapses it to zero.
    pub fn inverse(&self) -> Result<Self, LedgerError> {
        let inverse = Decimal::ONE
            .checked_div(self.rate)
            .ok_or(LedgerError::ArithmeticOverflow)?
            .round_dp_with_strategy(INVERSE_RATE_SCALE, RoundingStrategy::MidpointAwayFromZero);

        Self::new(self.to_currency.clone(), self.from_currency.clone(), inverse)
    }
}
