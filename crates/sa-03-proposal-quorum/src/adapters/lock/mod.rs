//! # State Directory Locking
//!
//! Prevents two service processes from mutating the same state directory.
//! During a restart the successor may start while its predecessor is still
//! being killed, so acquisition waits for the lock with backoff.
//!
//! ## Modules
//!
//! - `flock`: `StateLock` implementation using fs2
//! - `security`: stale-holder detection and timeouts

mod flock;
mod security;

pub use flock::{LockError, StateLock};
pub use security::DEFAULT_LOCK_TIMEOUT;
