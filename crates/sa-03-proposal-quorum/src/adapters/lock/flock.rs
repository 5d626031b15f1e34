//! # File Lock Implementation
//!
//! Uses `fs2` for cross-platform file locking (flock on Unix, LockFile on Windows).

use super::security::{is_process_running, MAX_RETRY_DELAY};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

/// Errors from state directory locking.
#[derive(Debug, Error)]
pub enum LockError {
    /// Lock file could not be created.
    #[error("Failed to create lock file: {0}")]
    CreateFailed(#[source] io::Error),

    /// Another live process holds the lock.
    #[error("State lock {} held by another process (pid {pid:?})", .path.display())]
    AlreadyLocked { pid: Option<u32>, path: PathBuf },

    /// Failed to record our PID in the lock file.
    #[error("Failed to write PID to lock file: {0}")]
    WriteFailed(#[source] io::Error),
}

/// Exclusive lock on a state directory.
///
/// Acquired on service startup, released on drop (RAII).
pub struct StateLock {
    file: File,
    path: PathBuf,
    pid: u32,
}

impl StateLock {
    /// Lock file name.
    pub const LOCK_FILE: &'static str = "LOCK";

    /// Acquire the lock, waiting up to `timeout` for the current holder.
    ///
    /// # Errors
    ///
    /// Returns `LockError::AlreadyLocked` if a live process still holds the
    /// lock when the timeout expires.
    pub fn acquire(state_dir: &Path, timeout: Duration) -> Result<Self, LockError> {
        let deadline = Instant::now() + timeout;
        let lock_path = state_dir.join(Self::LOCK_FILE);
        let mut retry_delay = Duration::from_millis(50);

        loop {
            // Opening must not truncate: the holder's PID lives in this file.
            let file = OpenOptions::new()
                .create(true)
                .read(true)
                .write(true)
                .truncate(false)
                .open(&lock_path)
                .map_err(LockError::CreateFailed)?;

            if file.try_lock_exclusive().is_ok() {
                let pid = std::process::id();
                let mut locked = file;
                Self::record_pid(&mut locked, pid).map_err(LockError::WriteFailed)?;
                info!(pid, path = %lock_path.display(), "[sa-03] acquired state lock");
                return Ok(Self {
                    file: locked,
                    path: lock_path,
                    pid,
                });
            }

            // flock dies with its holder; a dead PID only means the file is stale.
            let holder = Self::read_existing_pid(&lock_path).filter(|&pid| is_process_running(pid));
            debug!(holder = ?holder, "[sa-03] state lock busy");

            if Instant::now() >= deadline {
                return Err(LockError::AlreadyLocked {
                    pid: holder,
                    path: lock_path,
                });
            }

            drop(file);
            std::thread::sleep(retry_delay);
            retry_delay = (retry_delay * 2).min(MAX_RETRY_DELAY);
        }
    }

    fn record_pid(file: &mut File, pid: u32) -> io::Result<()> {
        file.set_len(0)?;
        file.seek(SeekFrom::Start(0))?;
        writeln!(file, "{}", pid)?;
        file.sync_all()
    }

    /// PID of this process.
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Path to the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read PID from an existing lock file (for error messages).
    fn read_existing_pid(path: &Path) -> Option<u32> {
        let mut contents = String::new();
        File::open(path).ok()?.read_to_string(&mut contents).ok()?;
        contents.trim().parse().ok()
    }
}

impl Drop for StateLock {
    fn drop(&mut self) {
        #[allow(clippy::incompatible_msrv)]
        let _ = self.file.unlock();
    }
}
