//! # Supervisor Service
//!
//! Role-level operations over a process table and a launcher:
//!
//! - `terminate_role`: kill every process matching a role
//! - `refresh`: kill, then launch one fresh detached instance
//! - `ensure`: launch an instance only if none is running
//! - `cleanup`: kill both roles, launch nothing

use crate::domain::errors::SupervisorError;
use crate::domain::matcher::RoleMatcher;
use crate::ports::outbound::{Launcher, ProcessTable};
use shared_types::Role;
use tracing::{info, warn};

pub struct Supervisor<T: ProcessTable, L: Launcher> {
    table: T,
    launcher: L,
    matcher: RoleMatcher,
}

impl<T: ProcessTable, L: Launcher> Supervisor<T, L> {
    pub fn new(table: T, launcher: L, matcher: RoleMatcher) -> Self {
        Self {
            table,
            launcher,
            matcher,
        }
    }

    pub fn table(&self) -> &T {
        &self.table
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Terminate every process of `role`; returns how many were killed.
    ///
    /// Processes already gone are skipped silently. Other kill failures are
    /// logged and do not stop the sweep.
    pub fn terminate_role(&self, role: Role) -> Result<usize, SupervisorError> {
        let mut killed = 0;
        for process in self.table.list()? {
            if !self.matcher.matches(&process, role) {
                continue;
            }
            match self.table.terminate(process.pid) {
                Ok(true) => {
                    info!(%role, pid = process.pid, "[sa-04] terminated");
                    killed += 1;
                }
                Ok(false) => {}
                Err(e) => warn!(%role, error = %e, "[sa-04] could not terminate"),
            }
        }
        Ok(killed)
    }

    /// Replace any running instance of `role` with a fresh detached one.
    ///
    /// A launch failure is returned to the caller, which must stop.
    pub fn refresh(&self, role: Role) -> Result<u32, SupervisorError> {
        let killed = self.terminate_role(role)?;
        let pid = self.launcher.spawn_detached(role)?;
        info!(%role, killed, pid, "[sa-04] role refreshed");
        Ok(pid)
    }

    /// Launch `role` unless an instance is already running.
    ///
    /// Returns the pid of the launched process, `None` if nothing was done.
    pub fn ensure(&self, role: Role) -> Result<Option<u32>, SupervisorError> {
        let running = self
            .table
            .list()?
            .iter()
            .any(|process| self.matcher.matches(process, role));
        if running {
            return Ok(None);
        }
        warn!(%role, "[sa-04] no running instance, launching");
        self.launcher.spawn_detached(role).map(Some)
    }

    /// Terminate both roles. Touches no state.
    pub fn cleanup(&self) -> Result<usize, SupervisorError> {
        let mut killed = 0;
        for role in Role::ALL {
            killed += self.terminate_role(role)?;
        }
        info!(killed, "[sa-04] cleanup finished");
        Ok(killed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryProcessTable, RecordingLauncher};
    use crate::domain::entities::{ProcessDescriptor, Runtime};
    use std::sync::Arc;

    const PROGRAM: &str = "/opt/self-amend/self-amend";

    fn runtime() -> Runtime {
        Runtime::new(PROGRAM, None)
    }

    fn running() -> Vec<ProcessDescriptor> {
        vec![
            ProcessDescriptor::new(10, "self-amend", &[PROGRAM, "--service"]),
            ProcessDescriptor::new(11, "self-amend", &[PROGRAM, "--watchdog"]),
            ProcessDescriptor::new(12, "sshd", &["sshd", "-D"]),
            ProcessDescriptor::new(13, "self-amend", &[PROGRAM, "--watchdog", "extra"]),
        ]
    }

    fn supervisor(
        table: Arc<InMemoryProcessTable>,
    ) -> Supervisor<Arc<InMemoryProcessTable>, RecordingLauncher> {
        Supervisor::new(
            table.clone(),
            RecordingLauncher::attached_to(table, runtime()),
            RoleMatcher::with_own_pid(&runtime(), 1),
        )
    }

    #[test]
    fn test_refresh_replaces_only_the_role() {
        let table = Arc::new(InMemoryProcessTable::new(running()));
        let sup = supervisor(table.clone());

        let pid = sup.refresh(Role::Watchdog).unwrap();

        assert_eq!(table.terminated(), vec![11]);
        assert_eq!(sup.launcher().launches(), vec![Role::Watchdog]);
        let pids: Vec<u32> = table.running().iter().map(|p| p.pid).collect();
        assert_eq!(pids, vec![10, 12, 13, pid]);
    }

    #[test]
    fn test_refresh_twice_keeps_one_instance() {
        let table = Arc::new(InMemoryProcessTable::new(running()));
        let sup = supervisor(table.clone());

        let first = sup.refresh(Role::Service).unwrap();
        sup.refresh(Role::Service).unwrap();

        assert_eq!(table.terminated(), vec![10, first]);
    }

    #[test]
    fn test_refresh_with_nothing_running_still_launches() {
        let table = Arc::new(InMemoryProcessTable::default());
        let sup = supervisor(table.clone());

        sup.refresh(Role::Service).unwrap();
        assert!(table.terminated().is_empty());
        assert_eq!(table.running().len(), 1);
    }

    #[test]
    fn test_launch_failure_is_returned() {
        let table = Arc::new(InMemoryProcessTable::new(running()));
        let sup = Supervisor::new(
            table.clone(),
            RecordingLauncher::failing(),
            RoleMatcher::with_own_pid(&runtime(), 1),
        );

        let err = sup.refresh(Role::Watchdog).unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(table.terminated(), vec![11]);
    }

    #[test]
    fn test_ensure_leaves_running_instance_alone() {
        let table = Arc::new(InMemoryProcessTable::new(running()));
        let sup = supervisor(table.clone());

        assert_eq!(sup.ensure(Role::Service).unwrap(), None);
        assert!(sup.launcher().launches().is_empty());
        assert!(table.terminated().is_empty());
    }

    #[test]
    fn test_ensure_launches_missing_role() {
        let table = Arc::new(InMemoryProcessTable::new(vec![ProcessDescriptor::new(
            12,
            "sshd",
            &["sshd", "-D"],
        )]));
        let sup = supervisor(table.clone());

        let pid = sup.ensure(Role::Service).unwrap();
        assert!(pid.is_some());
        assert_eq!(sup.launcher().launches(), vec![Role::Service]);
    }

    #[test]
    fn test_cleanup_kills_both_roles_only() {
        let table = Arc::new(InMemoryProcessTable::new(running()));
        let sup = supervisor(table.clone());

        assert_eq!(sup.cleanup().unwrap(), 2);
        assert!(sup.launcher().launches().is_empty());
        let pids: Vec<u32> = table.running().iter().map(|p| p.pid).collect();
        assert_eq!(pids, vec![12, 13]);
    }
}
