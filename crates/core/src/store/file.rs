//! File-backed account store.
//!
//! Layout: `<root>/<account id>.json`, one pretty-printed JSON record per
//! account. Writes go to a temp file in the same directory which is synced
//! and then renamed over the record, so a reader sees either the previous
//! or the new complete record.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use cambio_shared::AccountId;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::{AccountStore, StoreError};
use crate::account::Account;

const RECORD_EXTENSION: &str = "json";

/// Account store keeping one JSON file per account.
#[derive(Debug, Clone)]
pub struct FileAccountStore {
    root: PathBuf,
}

impl FileAccountStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Init` if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        if !root.is_dir() {
            fs::create_dir_all(&root).map_err(|source| StoreError::Init {
                path: root.clone(),
                source,
            })?;
            info!(path = %root.display(), "Created accounts directory");
        }
        Ok(Self { root })
    }

    /// Directory holding the account records.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, id: &AccountId) -> PathBuf {
        self.root.join(format!("{id}.{RECORD_EXTENSION}"))
    }
}

impl AccountStore for FileAccountStore {
    fn load(&self, id: &AccountId) -> Result<Option<Account>, StoreError> {
        let path = self.record_path(id);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(account_id = %id, path = %path.display(), "Account file not found");
                return Ok(None);
            }
            Err(source) => {
                return Err(StoreError::Read {
                    id: id.clone(),
                    source,
                });
            }
        };

        let account: Account =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
                id: id.clone(),
                source,
            })?;

        if account.id != *id {
            return Err(StoreError::IdMismatch {
                expected: id.clone(),
                found: account.id,
            });
        }
        Ok(Some(account))
    }

    fn store(&self, account: &Account) -> Result<(), StoreError> {
        let id = &account.id;
        let write_err = |source| StoreError::Write {
            id: id.clone(),
            source,
        };

        let bytes = serde_json::to_vec_pretty(account).map_err(|source| StoreError::Encode {
            id: id.clone(),
            source,
        })?;

        let mut staged = NamedTempFile::new_in(&self.root).map_err(write_err)?;
        staged.write_all(&bytes).map_err(write_err)?;
        staged.as_file().sync_all().map_err(write_err)?;

        let path = self.record_path(id);
        staged
            .persist(&path)
            .map_err(|err| write_err(err.error))?;

        debug!(account_id = %id, path = %path.display(), "Account saved");
        Ok(())
    }
}
