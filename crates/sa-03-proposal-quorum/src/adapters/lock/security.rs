//! # Lock Security
//!
//! - **Stale Holders**: a lock whose recorded PID is gone is reclaimed
//! - **Bounded Wait**: acquisition gives up after a timeout

use std::time::Duration;

/// How long a starting service waits for its predecessor to release the lock.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound between two acquisition attempts.
pub const MAX_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Checks if a process with the given PID is still running.
pub fn is_process_running(pid: u32) -> bool {
    #[cfg(unix)]
    {
        std::path::Path::new(&format!("/proc/{}", pid)).exists()
    }

    #[cfg(not(unix))]
    {
        let _ = pid;
        true
    }
}
