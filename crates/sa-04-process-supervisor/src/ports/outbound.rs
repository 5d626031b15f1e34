//! # Outbound Ports (Driven Ports / SPI)
//!
//! The operating-system facilities the supervisor drives.

use crate::domain::entities::ProcessDescriptor;
use crate::domain::errors::SupervisorError;
use shared_types::Role;
use std::sync::Arc;

/// Enumerate and terminate processes.
pub trait ProcessTable: Send + Sync {
    /// Snapshot of running processes. Processes that vanish while being
    /// read are skipped.
    fn list(&self) -> Result<Vec<ProcessDescriptor>, SupervisorError>;

    /// Forcefully terminate `pid`.
    ///
    /// Returns `Ok(false)` when the process no longer exists.
    fn terminate(&self, pid: u32) -> Result<bool, SupervisorError>;
}

/// Start a role as an independent process.
pub trait Launcher: Send + Sync {
    /// Spawn `role` in its own session so it outlives the caller.
    ///
    /// Returns the new process id.
    fn spawn_detached(&self, role: Role) -> Result<u32, SupervisorError>;
}

impl<T: ProcessTable + ?Sized> ProcessTable for Arc<T> {
    fn list(&self) -> Result<Vec<ProcessDescriptor>, SupervisorError> {
        (**self).list()
    }

    fn terminate(&self, pid: u32) -> Result<bool, SupervisorError> {
        (**self).terminate(pid)
    }
}
