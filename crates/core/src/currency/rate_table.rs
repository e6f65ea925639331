//! Directed exchange-rate table.
//!
//! Registration is rare and the table is read-mostly, so a concurrent map
//! with atomic per-key insert is enough. Re-registering a pair overwrites it
//! (last write wins); no ordering is promised between concurrent writers.

use cambio_shared::CurrencyCode;
use dashmap::DashMap;
use rust_decimal::Decimal;
use tracing::info;

use super::exchange::ExchangeRate;
use crate::ledger::LedgerError;

type RateKey = (CurrencyCode, CurrencyCode);

/// Holds directed exchange rates and derives inverses on registration.
#[derive(Debug, Default)]
pub struct RateTable {
    rates: DashMap<RateKey, Decimal>,
}

impl RateTable {
    /// Creates an empty rate table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `from -> to = rate` together with
    /// `to -> from = round(1 / rate, 6, half-up)`.
    ///
    /// Registering an identity pair (`from == to`) stores only the given rate.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRate` if `rate` is not positive.
    pub fn register(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
        rate: Decimal,
    ) -> Result<ExchangeRate, LedgerError> {
        let forward = ExchangeRate::new(from.clone(), to.clone(), rate)?;

        if from != to {
            let inverse = forward.inverse()?;
            self.insert(&inverse);
        }
        self.insert(&forward);

        info!(
            from_currency = %from,
            to_currency = %to,
            rate = %rate,
            "Registered exchange rate: 1 {from} = {rate} {to}"
        );
        Ok(forward)
    }

    /// Looks up the directed rate `from -> to`.
    ///
    /// # Errors
    ///
    /// Returns `RateNotFound` if the pair was never registered.
    pub fn lookup(&self, from: &CurrencyCode, to: &CurrencyCode) -> Result<Decimal, LedgerError> {
        self.rates
            .get(&(from.clone(), to.clone()))
            .map(|rate| *rate.value())
            .ok_or_else(|| LedgerError::RateNotFound {
                from: from.clone(),
                to: to.clone(),
            })
    }

    /// Returns true if `from -> to` has a registered rate.
    #[must_use]
    pub fn contains(&self, from: &CurrencyCode, to: &CurrencyCode) -> bool {
        self.rates.contains_key(&(from.clone(), to.clone()))
    }

    /// Number of directed pairs held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns true if no rate has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    fn insert(&self, rate: &ExchangeRate) {
        self.rates.insert(
            (rate.from_currency.clone(), rate.to_currency.clone()),
            rate.rate,
        );
    }
}
