//! # `/proc` Process Table
//!
//! Linux process enumeration from `/proc/<pid>/{comm,cmdline}` and
//! termination with `SIGKILL`.

use crate::domain::entities::ProcessDescriptor;
use crate::domain::errors::SupervisorError;
use crate::ports::outbound::ProcessTable;
use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ProcFsTable {
    root: PathBuf,
}

impl ProcFsTable {
    pub fn new() -> Self {
        Self::with_root("/proc")
    }

    /// Read from an alternative mount point.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn describe(dir: &Path, pid: u32) -> Option<ProcessDescriptor> {
        let comm = std::fs::read_to_string(dir.join("comm")).ok()?;
        let cmdline = std::fs::read(dir.join("cmdline")).ok()?;
        Some(ProcessDescriptor {
            pid,
            name: comm.trim_end_matches('\n').to_string(),
            argv: parse_cmdline(&cmdline),
        })
    }
}

impl Default for ProcFsTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessTable for ProcFsTable {
    fn list(&self) -> Result<Vec<ProcessDescriptor>, SupervisorError> {
        let entries = std::fs::read_dir(&self.root).map_err(SupervisorError::ProcessTable)?;
        Ok(entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let pid = entry.file_name().to_str()?.parse::<u32>().ok()?;
                Self::describe(&entry.path(), pid)
            })
            .collect())
    }

    fn terminate(&self, pid: u32) -> Result<bool, SupervisorError> {
        let raw = i32::try_from(pid).map_err(|_| SupervisorError::Terminate {
            pid,
            source: Errno::EINVAL,
        })?;
        match kill(Pid::from_raw(raw), Signal::SIGKILL) {
            Ok(()) => Ok(true),
            Err(Errno::ESRCH) => Ok(false),
            Err(source) => Err(SupervisorError::Terminate { pid, source }),
        }
    }
}

/// Split a NUL-separated `cmdline`; kernel threads have an empty one.
fn parse_cmdline(raw: &[u8]) -> Vec<String> {
    raw.split(|&b| b == 0)
        .filter(|arg| !arg.is_empty())
        .map(|arg| String::from_utf8_lossy(arg).into_owned())
        .collect()
}
