//! Multi-currency handling and exchange rates.

pub mod conversion;
pub mod exchange;
pub mod rate_table;

#[cfg(test)]
mod props;

pub use conversion::convert_amount;
pub use exchange::{ExchangeRate, INVERSE_RATE_SCALE};
pub use rate_table::RateTable;
