//! Typed account identifiers.
//!
//! An account id doubles as the file stem of its durable record and as the
//! key that orders lock acquisition, so it is restricted to a path-safe
//! alphabet and compares by plain byte order.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum length of an account id.
pub const MAX_ACCOUNT_ID_LEN: usize = 64;

/// Errors produced when parsing an [`AccountId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountIdError {
    /// The id is empty.
    #[error("account id cannot be empty")]
    Empty,

    /// The id exceeds [`MAX_ACCOUNT_ID_LEN`].
    #[error("account id is {len} characters long, maximum is {MAX_ACCOUNT_ID_LEN}")]
    TooLong {
        /// Actual length.
        len: usize,
    },

    /// The id contains a character outside `[A-Za-z0-9_-]`.
    #[error("account id contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// Unique identifier for a ledger account (e.g. `ACC001`).
///
/// Ordering is lexicographic over the raw bytes; the ledger relies on it to
/// pick a deterministic lock order for two-account operations.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    /// Parses and validates an account id.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty, too long, or contains characters
    /// other than ASCII alphanumerics, `-` and `_`.
    pub fn new(value: impl Into<String>) -> Result<Self, AccountIdError> {
        let value = value.into();
        if value.is_empty() {
            return Err(AccountIdError::Empty);
        }
        if value.len() > MAX_ACCOUNT_ID_LEN {
            return Err(AccountIdError::TooLong { len: value.len() });
        }
        if let Some(bad) = value
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(AccountIdError::InvalidCharacter(bad));
        }
        Ok(Self(value))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AccountId {
    type Error = AccountIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for AccountId {
    type Err = AccountIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
