//! # Supervisor Errors

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SupervisorError {
    /// The counterpart role could not be started. Fatal to the caller.
    #[error("Failed to launch {}: {source}", .program.display())]
    Launch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The process table could not be read.
    #[error("Failed to list processes: {0}")]
    ProcessTable(#[source] std::io::Error),

    /// A matching process could not be signalled (other than "already gone").
    #[error("Failed to terminate pid {pid}: {source}")]
    Terminate {
        pid: u32,
        #[source]
        source: nix::errno::Errno,
    },

    /// The filesystem watcher could not be set up.
    #[error("Failed to watch {}: {source}", .path.display())]
    Watch {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    /// The filesystem watcher stopped delivering events.
    #[error("Change stream closed")]
    StreamClosed,
}

impl SupervisorError {
    /// Launch failures end the role; everything else is logged and survived.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Launch { .. } | Self::StreamClosed)
    }
}
