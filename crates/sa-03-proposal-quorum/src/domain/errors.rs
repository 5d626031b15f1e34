//! # Store Errors
//!
//! Infrastructure failures of the state directory. Verification failures and
//! "no active proposal" are not errors here; they are [`ControlOutcome`]
//! values.
//!
//! [`ControlOutcome`]: super::outcome::ControlOutcome

use crate::adapters::lock::LockError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from reading or writing persisted state.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A state file could not be read or written.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A state file exists but cannot be interpreted.
    #[error("Corrupt state file {}: {reason}", .path.display())]
    Corrupt { path: PathBuf, reason: String },

    /// Another service instance owns the state directory.
    #[error(transparent)]
    Lock(#[from] LockError),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
