//! Demo load scenario.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Context;
use rand::Rng;
use rayon::prelude::*;
use rust_decimal::Decimal;
use tracing::{error, info, warn};

use cambio_core::{AccountAdmin, LedgerError, LedgerService};
use cambio_shared::config::DemoConfig;
use cambio_shared::{AccountId, CurrencyCode};

const FIRST_NAMES: [&str; 10] = [
    "Giorgi", "Davit", "Nikoloz", "Luka", "Sandro", "Nino", "Mariam", "Tamar", "Salome", "Ana",
];

const SURNAMES: [&str; 10] = [
    "Beridze",
    "Giorgadze",
    "Maisuradze",
    "Kapanadze",
    "Tsintsadze",
    "Gelashvili",
    "Tsiklauri",
    "Chavchavadze",
    "Javakhishvili",
    "Lomidze",
];

const CURRENCIES: [&str; 4] = ["USD", "EUR", "GBP", "GEL"];

/// Forward rates registered at startup; inverses are derived.
const RATES: [(&str, &str, i64, u32); 6] = [
    ("USD", "EUR", 85, 2),
    ("USD", "GBP", 73, 2),
    ("USD", "GEL", 265, 2),
    ("EUR", "GBP", 86, 2),
    ("EUR", "GEL", 312, 2),
    ("GBP", "GEL", 363, 2),
];

/// Opening balance range per currency, whole units, `[low, high)`.
const OPENING_RANGES: [(&str, u32, u32); 4] = [
    ("USD", 1_000, 11_000),
    ("EUR", 1_000, 9_000),
    ("GBP", 1_000, 8_000),
    ("GEL", 5_000, 25_000),
];

/// Runs every demo phase in order. Individual operation failures are logged
/// and do not abort the run.
pub fn run(ledger: &Arc<LedgerService>, config: &DemoConfig) -> anyhow::Result<()> {
    let currencies = CURRENCIES
        .iter()
        .map(|code| CurrencyCode::new(*code))
        .collect::<Result<Vec<_>, _>>()?;

    setup_exchange_rates(ledger)?;
    let accounts = create_accounts(ledger, config.accounts)?;
    if accounts.is_empty() {
        warn!("No demo accounts configured, skipping operations");
        return Ok(());
    }

    random_exchanges(ledger, &accounts, &currencies, config.random_exchanges);
    single_account_exchanges(
        ledger,
        &accounts[0],
        &currencies,
        config.single_account_exchanges,
    );
    random_transfers(ledger, &accounts, &currencies, config.transfers);

    let admin = AccountAdmin::new(Arc::clone(ledger));
    balance_queries(&admin, &accounts, &currencies, config.balance_queries);
    status_cycles(&admin, &accounts, config.status_cycles);
    Ok(())
}

fn setup_exchange_rates(ledger: &LedgerService) -> anyhow::Result<()> {
    info!("Setting up exchange rates");
    for (from, to, mantissa, scale) in RATES {
        ledger
            .register_rate(
                &CurrencyCode::new(from)?,
                &CurrencyCode::new(to)?,
                Decimal::new(mantissa, scale),
            )
            .with_context(|| format!("Failed to register rate {from}-{to}"))?;
    }
    info!(pairs = ledger.rates().len(), "Exchange rates setup completed");
    Ok(())
}

fn create_accounts(ledger: &LedgerService, count: u32) -> anyhow::Result<Vec<AccountId>> {
    info!(count, "Creating demo accounts");
    let mut rng = rand::thread_rng();
    let mut accounts = Vec::new();

    for n in 1..=count {
        let id = AccountId::new(format!("ACC{n:03}"))?;
        let owner = format!(
            "{} {}",
            FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())],
            SURNAMES[rng.gen_range(0..SURNAMES.len())]
        );
        let balances = OPENING_RANGES
            .iter()
            .map(|(code, low, high)| -> anyhow::Result<(CurrencyCode, Decimal)> {
                Ok((
                    CurrencyCode::new(*code)?,
                    Decimal::from(rng.gen_range(*low..*high)),
                ))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        match ledger.register_account(id.clone(), owner, balances) {
            Ok(_) => accounts.push(id),
            Err(LedgerError::AccountAlreadyExists(_)) => {
                warn!(account_id = %id, "Account already exists, reusing stored record");
                accounts.push(id);
            }
            Err(err) => error!(account_id = %id, error = %err, "Failed to create account"),
        }
    }

    info!(created = accounts.len(), "Demo accounts ready");
    Ok(accounts)
}

fn random_exchanges(
    ledger: &LedgerService,
    accounts: &[AccountId],
    currencies: &[CurrencyCode],
    count: u32,
) {
    info!(count, "Starting concurrent exchange operations");
    let mut rng = rand::thread_rng();
    let plan: Vec<_> = (0..count)
        .map(|_| {
            (
                &accounts[rng.gen_range(0..accounts.len())],
                &currencies[rng.gen_range(0..currencies.len())],
                &currencies[rng.gen_range(0..currencies.len())],
                Decimal::from(rng.gen_range(100u32..1_100)),
            )
        })
        .collect();

    let completed = plan
        .into_par_iter()
        .filter(|(_, from, to, _)| from != to)
        .filter(|(account, from, to, amount)| exchange_logged(ledger, account, from, to, *amount))
        .count();

    info!(completed, "All exchange operations completed");
}

fn single_account_exchanges(
    ledger: &LedgerService,
    account: &AccountId,
    currencies: &[CurrencyCode],
    count: u32,
) {
    info!(account_id = %account, count, "Starting single-account concurrent exchanges");
    let amount = Decimal::new(10_000, 2);
    let count = usize::try_from(count).unwrap_or(usize::MAX);

    let completed = (0..count)
        .into_par_iter()
        .filter(|i| {
            let from = &currencies[i % currencies.len()];
            let to = &currencies[(i + 1) % currencies.len()];
            exchange_logged(ledger, account, from, to, amount)
        })
        .count();

    let mut attempts: BTreeMap<&CurrencyCode, usize> = BTreeMap::new();
    for i in 0..count {
        *attempts.entry(&currencies[i % currencies.len()]).or_default() += 1;
    }

    info!(account_id = %account, completed, "Single-account exchanges completed");
    for (currency, operations) in attempts {
        match ledger.balance(account, currency) {
            Ok(Some(balance)) => info!(
                account_id = %account,
                currency = %currency,
                balance = %balance,
                operations,
                "Final balance for {account} {currency}: {balance} after {operations} operations"
            ),
            Ok(None) => {}
            Err(err) => error!(account_id = %account, error = %err, "Failed to read balance"),
        }
    }
}

fn exchange_logged(
    ledger: &LedgerService,
    account: &AccountId,
    from: &CurrencyCode,
    to: &CurrencyCode,
    amount: Decimal,
) -> bool {
    match ledger.exchange(account, from, to, amount) {
        Ok(_) => true,
        Err(err) => {
            error!(
                account_id = %account,
                from_currency = %from,
                to_currency = %to,
                amount = %amount,
                code = err.error_code(),
                "Exchange operation failed: {err}"
            );
            false
        }
    }
}

fn random_transfers(
    ledger: &LedgerService,
    accounts: &[AccountId],
    currencies: &[CurrencyCode],
    count: u32,
) {
    if accounts.len() < 2 {
        warn!("Transfers need at least two accounts, skipping");
        return;
    }

    info!(count, "Performing bulk transfer operations");
    let mut rng = rand::thread_rng();
    for _ in 0..count {
        let from = rng.gen_range(0..accounts.len());
        let to = (from + rng.gen_range(1..accounts.len())) % accounts.len();
        let currency = &currencies[rng.gen_range(0..currencies.len())];
        let amount = Decimal::from(rng.gen_range(50u32..550));

        if let Err(err) = ledger.transfer(&accounts[from], &accounts[to], currency, amount) {
            error!(
                from_account = %accounts[from],
                to_account = %accounts[to],
                code = err.error_code(),
                "Transfer failed: {err}"
            );
        }
    }
}

fn balance_queries(
    admin: &AccountAdmin,
    accounts: &[AccountId],
    currencies: &[CurrencyCode],
    count: u32,
) {
    info!("Demonstrating account operations");
    let mut rng = rand::thread_rng();
    for _ in 0..count {
        let account = &accounts[rng.gen_range(0..accounts.len())];
        let currency = &currencies[rng.gen_range(0..currencies.len())];
        match admin.get_balance(account, currency) {
            Ok(Some(balance)) => info!("{account} {currency} balance: {balance}"),
            Ok(None) => info!("{account} holds no {currency}"),
            Err(err) => error!(account_id = %account, error = %err, "Failed to read balance"),
        }
    }
}

fn status_cycles(admin: &AccountAdmin, accounts: &[AccountId], count: u32) {
    let mut rng = rand::thread_rng();
    for _ in 0..count {
        let account = &accounts[rng.gen_range(0..accounts.len())];
        if let Err(err) = admin.freeze(account).and_then(|_| admin.unfreeze(account)) {
            error!(account_id = %account, code = err.error_code(), "Status cycle failed: {err}");
        }
    }
    info!("Account operations demonstration completed");
}
