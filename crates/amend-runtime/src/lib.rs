//! # Amend Runtime Library
//!
//! Wiring of the self-amending executable. The entry point is the
//! `self-amend` binary in `main.rs`; the modules are exposed for tests.
//!
//! - `cli` - the invocation contract (exactly one role flag)
//! - `config` - environment configuration and startup validation
//! - `roles` - service, watchdog and cleanup entry points
//! - `signals` - SIGINT/SIGTERM handling

pub mod cli;
pub mod config;
pub mod roles;
pub mod signals;

pub use cli::{Cli, Mode};
pub use config::{ConfigError, RuntimeConfig};
