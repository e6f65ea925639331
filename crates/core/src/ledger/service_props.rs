//! Property-based tests for LedgerService.
//!
//! - Conservation: same-currency transfers never create or destroy funds
//! - Non-negativity: no sequence of operations drives a balance below zero
//! - Failed operations leave every balance unchanged

use std::sync::Arc;

use cambio_shared::{AccountId, CurrencyCode};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::LedgerService;
use crate::store::InMemoryAccountStore;

const ACCOUNTS: [&str; 4] = ["ACC001", "ACC002", "ACC003", "ACC004"];
const CURRENCIES: [&str; 3] = ["USD", "EUR", "GEL"];

/// Strategy to generate amounts (0.01 to 2,000.00), large enough to
/// regularly exceed the opening balances.
fn amount() -> impl Strategy<Value = Decimal> {
    (1i64..200_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate opening balances (0.00 to 1,000.00).
fn opening_balance() -> impl Strategy<Value = Decimal> {
    (0i64..100_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

#[derive(Debug, Clone)]
enum Op {
    Transfer {
        from: usize,
        to: usize,
        currency: usize,
        amount: Decimal,
    },
    Exchange {
        account: usize,
        from: usize,
        to: usize,
        amount: Decimal,
    },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..ACCOUNTS.len(), 0..ACCOUNTS.len(), 0..CURRENCIES.len(), amount()).prop_map(
            |(from, to, currency, amount)| Op::Transfer {
                from,
                to,
                currency,
                amount
            }
        ),
        (0..ACCOUNTS.len(), 0..CURRENCIES.len(), 0..CURRENCIES.len(), amount()).prop_map(
            |(account, from, to, amount)| Op::Exchange {
                account,
                from,
                to,
                amount
            }
        ),
    ]
}

fn account_id(index: usize) -> AccountId {
    AccountId::new(ACCOUNTS[index]).unwrap()
}

fn currency(index: usize) -> CurrencyCode {
    CurrencyCode::new(CURRENCIES[index]).unwrap()
}

fn setup(openings: &[Decimal]) -> LedgerService {
    let ledger = LedgerService::new(Arc::new(InMemoryAccountStore::new()));
    for (i, raw) in ACCOUNTS.iter().enumerate() {
        let balances = (0..CURRENCIES.len())
            .map(|c| (currency(c), openings[i * CURRENCIES.len() + c]));
        ledger
            .register_account(AccountId::new(*raw).unwrap(), "Salome Javakhishvili", balances)
            .unwrap();
    }
    ledger
        .register_rate(&currency(0), &currency(1), Decimal::new(85, 2))
        .unwrap();
    ledger
        .register_rate(&currency(0), &currency(2), Decimal::new(265, 2))
        .unwrap();
    ledger
        .register_rate(&currency(1), &currency(2), Decimal::new(312, 2))
        .unwrap();
    ledger
}

fn total(ledger: &LedgerService, currency_index: usize) -> Decimal {
    (0..ACCOUNTS.len())
        .filter_map(|a| {
            ledger
                .balance(&account_id(a), &currency(currency_index))
                .unwrap()
        })
        .sum()
}

fn snapshot(ledger: &LedgerService) -> Vec<Option<Decimal>> {
    (0..ACCOUNTS.len())
        .flat_map(|a| (0..CURRENCIES.len()).map(move |c| (a, c)))
        .map(|(a, c)| ledger.balance(&account_id(a), &currency(c)).unwrap())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// *For any* sequence of same-currency transfers, the per-currency total
    /// across all accounts SHALL be unchanged.
    #[test]
    fn prop_transfers_conserve_totals(
        openings in prop::collection::vec(opening_balance(), ACCOUNTS.len() * CURRENCIES.len()),
        transfers in prop::collection::vec(
            (0..ACCOUNTS.len(), 0..ACCOUNTS.len(), 0..CURRENCIES.len(), amount()),
            1..40,
        ),
    ) {
        let ledger = setup(&openings);
        let before: Vec<Decimal> = (0..CURRENCIES.len()).map(|c| total(&ledger, c)).collect();

        for (from, to, c, amount) in transfers {
            let _ = ledger.transfer(&account_id(from), &account_id(to), &currency(c), amount);
        }

        let after: Vec<Decimal> = (0..CURRENCIES.len()).map(|c| total(&ledger, c)).collect();
        prop_assert_eq!(before, after);
    }

    /// *For any* mix of exchanges and transfers, every balance SHALL stay
    /// non-negative, and every rejected operation SHALL leave all balances
    /// exactly as they were.
    #[test]
    fn prop_balances_never_negative(
        openings in prop::collection::vec(opening_balance(), ACCOUNTS.len() * CURRENCIES.len()),
        ops in prop::collection::vec(op(), 1..40),
    ) {
        let ledger = setup(&openings);

        for op in ops {
            let before = snapshot(&ledger);
            let result = match op {
                Op::Transfer { from, to, currency: c, amount } => ledger
                    .transfer(&account_id(from), &account_id(to), &currency(c), amount)
                    .map(|_| ()),
                Op::Exchange { account, from, to, amount } => ledger
                    .exchange(&account_id(account), &currency(from), &currency(to), amount)
                    .map(|_| ()),
            };

            let after = snapshot(&ledger);
            if result.is_err() {
                prop_assert_eq!(&before, &after);
            }
            for balance in after.into_iter().flatten() {
                prop_assert!(balance >= Decimal::ZERO, "negative balance {}", balance);
            }
        }
    }
}
