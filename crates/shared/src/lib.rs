//! Shared types and configuration for Cambio.
//!
//! This crate provides common types used across all other crates:
//! - Account identifiers with path-safe validation
//! - ISO-style currency codes
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
pub use types::{AccountId, AccountIdError, CurrencyCode, CurrencyCodeError};
