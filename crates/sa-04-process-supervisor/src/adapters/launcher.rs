//! # Detached Launcher
//!
//! Starts a role in a new session (`setsid`), so that it is not killed
//! together with the launching process and survives it. stdin is detached,
//! stdout/stderr are inherited so the new role logs where its parent did.

use crate::domain::entities::Runtime;
use crate::domain::errors::SupervisorError;
use crate::ports::outbound::Launcher;
use shared_types::Role;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct DetachedLauncher {
    runtime: Runtime,
    working_dir: Option<PathBuf>,
}

impl DetachedLauncher {
    pub fn new(runtime: Runtime) -> Self {
        Self {
            runtime,
            working_dir: None,
        }
    }

    /// Run launched roles from `dir`.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    fn command(&self, role: Role) -> Command {
        let argv = self.runtime.command_line(role);
        let mut cmd = Command::new(&argv[0]);
        cmd.args(&argv[1..]).stdin(Stdio::null());
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            // SAFETY: setsid is async-signal-safe and touches no parent state.
            unsafe {
                cmd.pre_exec(|| {
                    nix::unistd::setsid()
                        .map(drop)
                        .map_err(|e| std::io::Error::from_raw_os_error(e as i32))
                });
            }
        }
        cmd
    }
}

impl Launcher for DetachedLauncher {
    fn spawn_detached(&self, role: Role) -> Result<u32, SupervisorError> {
        let mut child = self
            .command(role)
            .spawn()
            .map_err(|source| SupervisorError::Launch {
                program: self.runtime.program().to_path_buf(),
                source,
            })?;
        let pid = child.id();
        info!(%role, pid, "[sa-04] launched detached process");

        // Reap the child when it exits so it never lingers as a zombie.
        let reaper = std::thread::Builder::new()
            .name(format!("reap-{}", pid))
            .spawn(move || {
                let status = child.wait();
                debug!(pid, ?status, "[sa-04] detached process exited");
            });
        if let Err(e) = reaper {
            debug!(pid, error = %e, "[sa-04] could not start reaper thread");
        }
        Ok(pid)
    }
}
