//! Account records and status lifecycle.

pub mod model;

pub use model::{Account, AccountStatus};
