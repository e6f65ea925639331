//! Account administration.
//!
//! This module implements the account status lifecycle and balance queries:
//!
//! - `freeze` - `ACTIVE -> FROZEN`
//! - `unfreeze` - `FROZEN -> ACTIVE`
//! - `close` - `FROZEN -> CLOSED` (terminal)
//! - `get_balance` - lock-free read of one currency balance
//!
//! Status transitions run under the same per-account lock the ledger uses
//! for exchanges and transfers, so a transition never interleaves with a
//! balance mutation on the same account.

pub mod service;

#[cfg(test)]
mod service_props;

pub use service::AccountAdmin;
