//! # Watchdog
//!
//! Watch loop of the watchdog role: whenever the authoritative program has
//! been rewritten, replace the running service with a fresh one started from
//! the new file. Events for any other path are only logged.

use crate::adapters::watcher::ChangeStream;
use crate::domain::errors::SupervisorError;
use crate::ports::outbound::{Launcher, ProcessTable};
use crate::service::Supervisor;
use shared_types::Role;
use std::path::{Path, PathBuf};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

pub struct Watchdog<T: ProcessTable, L: Launcher> {
    supervisor: Supervisor<T, L>,
    program: PathBuf,
}

impl<T: ProcessTable, L: Launcher> Watchdog<T, L> {
    /// `program` must be spelled the way the change stream reports it, see
    /// [`watch_roots`].
    pub fn new(supervisor: Supervisor<T, L>, program: impl Into<PathBuf>) -> Self {
        Self {
            supervisor,
            program: program.into(),
        }
    }

    pub fn supervisor(&self) -> &Supervisor<T, L> {
        &self.supervisor
    }

    /// Run until `shutdown` fires or the stream ends.
    ///
    /// Returns an error if the service could not be relaunched or the change
    /// stream closed; both end the watchdog role. Any other refresh failure
    /// is logged and the loop keeps watching.
    pub async fn run(
        &self,
        mut changes: ChangeStream,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<(), SupervisorError> {
        info!(program = %self.program.display(), "[sa-04] watchdog started");
        loop {
            if *shutdown.borrow() {
                break;
            }
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                change = changes.next() => {
                    let Some(change) = change else {
                        error!("[sa-04] change stream closed");
                        return Err(SupervisorError::StreamClosed);
                    };
                    if change.completes_write_of(&self.program) {
                        info!("[sa-04] program rewritten, restarting service");
                        match self.supervisor.refresh(Role::Service) {
                            Ok(_) => {}
                            Err(e) if e.is_fatal() => return Err(e),
                            Err(e) => warn!(error = %e, "[sa-04] service refresh failed, still watching"),
                        }
                    } else {
                        debug!(path = %change.path.display(), kind = ?change.kind, "[sa-04] ignored change");
                    }
                }
            }
        }
        info!("[sa-04] watchdog stopped");
        Ok(())
    }
}

/// Directories to watch and the canonical program path.
///
/// The state directory is always watched; the program's directory is added
/// when the program lives elsewhere.
pub fn watch_roots(
    state_dir: &Path,
    program: &Path,
) -> Result<(Vec<PathBuf>, PathBuf), std::io::Error> {
    let state_dir = state_dir.canonicalize()?;
    let parent = match program.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.canonicalize()?,
        _ => std::env::current_dir()?,
    };
    let file_name = program.file_name().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("{} has no file name", program.display()),
        )
    })?;

    let mut roots = vec![state_dir.clone()];
    if !parent.starts_with(&state_dir) {
        roots.push(parent.clone());
    }
    Ok((roots, parent.join(file_name)))
}
