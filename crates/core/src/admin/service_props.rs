//! Property-based tests for AccountAdmin.
//!
//! - Stored status always follows the lifecycle state machine
//! - Rejected transitions never change the stored status
//! - Status changes never touch balances

use std::sync::Arc;

use cambio_shared::{AccountId, CurrencyCode};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::AccountAdmin;
use crate::account::AccountStatus;
use crate::ledger::LedgerService;
use crate::store::InMemoryAccountStore;

fn target_status() -> impl Strategy<Value = AccountStatus> {
    prop_oneof![
        Just(AccountStatus::Active),
        Just(AccountStatus::Frozen),
        Just(AccountStatus::Closed),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* sequence of requested transitions, a request SHALL succeed
    /// iff the lifecycle allows it, and the stored status SHALL match the
    /// model after every step.
    #[test]
    fn prop_status_follows_lifecycle(
        requests in prop::collection::vec(target_status(), 1..30),
        opening in (0i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2)),
    ) {
        let ledger = Arc::new(LedgerService::new(Arc::new(InMemoryAccountStore::new())));
        let account_id = AccountId::new("ACC001").unwrap();
        let usd = CurrencyCode::new("USD").unwrap();
        ledger
            .register_account(account_id.clone(), "Tamar Kapanadze", [(usd.clone(), opening)])
            .unwrap();
        let admin = AccountAdmin::new(Arc::clone(&ledger));

        let mut model = AccountStatus::Active;
        for next in requests {
            let result = match next {
                AccountStatus::Active => admin.unfreeze(&account_id),
                AccountStatus::Frozen => admin.freeze(&account_id),
                AccountStatus::Closed => admin.close(&account_id),
            };

            prop_assert_eq!(result.is_ok(), model.can_transition_to(next));
            if result.is_ok() {
                model = next;
            }

            let stored = ledger.account(&account_id).unwrap().unwrap();
            prop_assert_eq!(stored.status, model);
            prop_assert_eq!(stored.balance(&usd), Some(opening));
        }
    }
}
