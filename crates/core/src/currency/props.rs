//! Property-based tests for exchange rates.
//!
//! - Inverse registration: `B -> A` equals `round(1 / r, 6, half-up)`
//! - Conversion of positive inputs stays positive and exact

use cambio_shared::CurrencyCode;
use proptest::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

use super::conversion::convert_amount;
use super::rate_table::RateTable;

/// Strategy to generate positive decimal amounts (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate exchange rates (0.0001 to 10000.0000) whose
/// six-digit inverse cannot round to zero.
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Strategy to generate an ordered pair of distinct currency codes.
fn currency_pair() -> impl Strategy<Value = (CurrencyCode, CurrencyCode)> {
    let codes = ["USD", "EUR", "GBP", "GEL", "JPY"];
    (0..codes.len(), 1..codes.len()).prop_map(move |(a, offset)| {
        let b = (a + offset) % codes.len();
        (
            CurrencyCode::new(codes[a]).unwrap(),
            CurrencyCode::new(codes[b]).unwrap(),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* positive rate `r` registered as `A -> B`, looking up `B -> A`
    /// SHALL yield `1 / r` rounded half-up to six fractional digits.
    #[test]
    fn prop_inverse_is_rounded_reciprocal(
        (from, to) in currency_pair(),
        rate in positive_rate(),
    ) {
        let table = RateTable::new();
        table.register(&from, &to, rate).unwrap();

        let expected = (Decimal::ONE / rate)
            .round_dp_with_strategy(6, RoundingStrategy::MidpointAwayFromZero);
        prop_assert_eq!(table.lookup(&to, &from).unwrap(), expected);
        prop_assert_eq!(table.lookup(&from, &to).unwrap(), rate);
    }

    /// *For any* registered rate, the inverse has at most six fractional digits.
    #[test]
    fn prop_inverse_scale_is_bounded(
        (from, to) in currency_pair(),
        rate in positive_rate(),
    ) {
        let table = RateTable::new();
        table.register(&from, &to, rate).unwrap();
        let inverse = table.lookup(&to, &from).unwrap();
        prop_assert!(inverse.normalize().scale() <= 6);
        prop_assert!(inverse > Decimal::ZERO);
    }

    /// *For any* positive amount and rate, conversion is the exact product.
    #[test]
    fn prop_conversion_is_exact_product(
        amount in positive_amount(),
        rate in positive_rate(),
    ) {
        let converted = convert_amount(amount, rate).unwrap();
        prop_assert_eq!(converted, amount * rate);
        prop_assert!(converted > Decimal::ZERO);
    }
}
