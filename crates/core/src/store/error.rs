//! Storage error types.

use std::path::PathBuf;

use cambio_shared::AccountId;
use thiserror::Error;

/// Account storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage root could not be prepared.
    #[error("failed to initialize account storage at {path}: {source}")]
    Init {
        /// Storage root.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Reading an account record failed.
    #[error("failed to read account {id}: {source}")]
    Read {
        /// Account being read.
        id: AccountId,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Writing an account record failed.
    #[error("failed to write account {id}: {source}")]
    Write {
        /// Account being written.
        id: AccountId,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// An account record could not be decoded.
    #[error("account record {id} is corrupt: {source}")]
    Corrupt {
        /// Account being read.
        id: AccountId,
        /// Decoding error.
        source: serde_json::Error,
    },

    /// An account could not be encoded.
    #[error("failed to encode account {id}: {source}")]
    Encode {
        /// Account being written.
        id: AccountId,
        /// Encoding error.
        source: serde_json::Error,
    },

    /// The record on disk belongs to a different account.
    #[error("account record {expected} contains account {found}")]
    IdMismatch {
        /// Id requested.
        expected: AccountId,
        /// Id found in the record.
        found: AccountId,
    },
}

impl StoreError {
    /// Returns the account id involved, if any.
    #[must_use]
    pub fn account_id(&self) -> Option<&AccountId> {
        match self {
            Self::Init { .. } => None,
            Self::Read { id, .. }
            | Self::Write { id, .. }
            | Self::Corrupt { id, .. }
            | Self::Encode { id, .. } => Some(id),
            Self::IdMismatch { expected, .. } => Some(expected),
        }
    }
}
