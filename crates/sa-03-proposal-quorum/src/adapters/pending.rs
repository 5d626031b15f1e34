//! # Pending Upload
//!
//! The raw upload waiting for verification. At most one exists: creating a
//! new one discards any leftover from a crashed attempt, and dropping the
//! guard always removes the file.

use super::files::{remove_if_exists, write_synced};
use crate::domain::errors::StoreError;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// RAII guard over the pending-upload scratch file.
#[derive(Debug)]
pub struct PendingUpload {
    path: PathBuf,
}

impl PendingUpload {
    /// Replace any existing pending upload with `bytes`.
    pub fn create(path: PathBuf, bytes: &[u8]) -> Result<Self, StoreError> {
        if path.exists() {
            debug!(path = %path.display(), "[sa-03] discarding stale pending upload");
            remove_if_exists(&path)?;
        }
        let guard = Self { path };
        write_synced(&guard.path, bytes)?;
        Ok(guard)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for PendingUpload {
    fn drop(&mut self) {
        if let Err(e) = remove_if_exists(&self.path) {
            warn!(error = %e, "[sa-03] failed to remove pending upload");
        }
    }
}
