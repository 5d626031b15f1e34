//! # Process Supervisor Subsystem (SA-04)
//!
//! Keeps the two roles of the self-amending program alive and in step:
//!
//! - the **service** role, on start, replaces any running watchdog with a
//!   fresh detached one;
//! - the **watchdog** role waits for the authoritative program to be
//!   rewritten and then replaces the running service with a fresh one.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): process descriptors, the exact
//!   role-matching rule, filesystem change classification
//! - **Ports Layer** (`ports/`): process table and launcher
//! - **Adapters Layer** (`adapters/`): `/proc` + `kill(2)`, `setsid`
//!   launcher, `notify` change stream, in-memory doubles
//! - **Service Layer** (`service.rs`, `watchdog.rs`): role refresh and the
//!   watch loop
//!
//! ## Failure Semantics
//!
//! Terminating a process that no longer exists is a no-op. A failed launch
//! is returned as [`SupervisorError::Launch`] and is fatal to the caller.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;
pub mod watchdog;

pub use adapters::launcher::DetachedLauncher;
pub use adapters::memory::{InMemoryProcessTable, RecordingLauncher};
pub use adapters::procfs::ProcFsTable;
pub use adapters::watcher::ChangeStream;
pub use domain::entities::{ProcessDescriptor, Runtime};
pub use domain::errors::SupervisorError;
pub use domain::events::{ChangeKind, FsChange};
pub use domain::matcher::RoleMatcher;
pub use ports::outbound::{Launcher, ProcessTable};
pub use service::Supervisor;
pub use watchdog::{watch_roots, Watchdog};
