//! # In-Memory Adapters
//!
//! Process table and launcher doubles for supervisor tests. A launcher can
//! be attached to a table so launched roles show up as running processes.

use crate::domain::entities::{ProcessDescriptor, Runtime};
use crate::domain::errors::SupervisorError;
use crate::ports::outbound::{Launcher, ProcessTable};
use parking_lot::Mutex;
use shared_types::Role;
use std::sync::Arc;

/// Process table backed by a vector.
#[derive(Default)]
pub struct InMemoryProcessTable {
    processes: Mutex<Vec<ProcessDescriptor>>,
    terminated: Mutex<Vec<u32>>,
}

impl InMemoryProcessTable {
    pub fn new(processes: Vec<ProcessDescriptor>) -> Self {
        Self {
            processes: Mutex::new(processes),
            terminated: Mutex::new(Vec::new()),
        }
    }

    pub fn insert(&self, process: ProcessDescriptor) {
        self.processes.lock().push(process);
    }

    pub fn running(&self) -> Vec<ProcessDescriptor> {
        self.processes.lock().clone()
    }

    /// Pids terminated so far, in order.
    pub fn terminated(&self) -> Vec<u32> {
        self.terminated.lock().clone()
    }
}

impl ProcessTable for InMemoryProcessTable {
    fn list(&self) -> Result<Vec<ProcessDescriptor>, SupervisorError> {
        Ok(self.running())
    }

    fn terminate(&self, pid: u32) -> Result<bool, SupervisorError> {
        let mut processes = self.processes.lock();
        let before = processes.len();
        processes.retain(|p| p.pid != pid);
        let found = processes.len() != before;
        if found {
            self.terminated.lock().push(pid);
        }
        Ok(found)
    }
}

/// Launcher that records requested roles instead of spawning.
pub struct RecordingLauncher {
    launches: Mutex<Vec<Role>>,
    next_pid: Mutex<u32>,
    attached: Option<(Arc<InMemoryProcessTable>, Runtime)>,
    fail: bool,
}

impl RecordingLauncher {
    pub fn new() -> Self {
        Self {
            launches: Mutex::new(Vec::new()),
            next_pid: Mutex::new(1000),
            attached: None,
            fail: false,
        }
    }

    /// Every launch fails as if the program were missing.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Register each launched role in `table` as invoked through `runtime`.
    pub fn attached_to(table: Arc<InMemoryProcessTable>, runtime: Runtime) -> Self {
        Self {
            attached: Some((table, runtime)),
            ..Self::new()
        }
    }

    pub fn launches(&self) -> Vec<Role> {
        self.launches.lock().clone()
    }
}

impl Default for RecordingLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl Launcher for RecordingLauncher {
    fn spawn_detached(&self, role: Role) -> Result<u32, SupervisorError> {
        if self.fail {
            return Err(SupervisorError::Launch {
                program: "missing".into(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            });
        }
        let pid = {
            let mut next = self.next_pid.lock();
            *next += 1;
            *next
        };
        self.launches.lock().push(role);
        if let Some((table, runtime)) = &self.attached {
            table.insert(ProcessDescriptor {
                pid,
                name: runtime.process_name(),
                argv: runtime
                    .command_line(role)
                    .iter()
                    .map(|a| a.to_string_lossy().into_owned())
                    .collect(),
            });
        }
        Ok(pid)
    }
}
