//! # Change Stream
//!
//! Turns `notify` callbacks into an endless stream of [`FsChange`] values
//! that a supervisory task can `await` alongside its shutdown signal.

use crate::domain::errors::SupervisorError;
use crate::domain::events::{ChangeKind, FsChange};
use notify::event::{AccessKind, AccessMode, ModifyKind, RenameMode};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Receiving end of a filesystem watch.
pub struct ChangeStream {
    rx: mpsc::UnboundedReceiver<FsChange>,
    // Dropping the watcher ends the stream.
    _watcher: Option<RecommendedWatcher>,
}

impl ChangeStream {
    /// Watch every directory in `roots` recursively.
    pub fn watch(roots: &[PathBuf]) -> Result<Self, SupervisorError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) => {
                for change in classify(&event) {
                    // Receiver gone means the watchdog is shutting down.
                    let _ = tx.send(change);
                }
            }
            Err(e) => warn!(error = %e, "[sa-04] filesystem watch error"),
        })
        .map_err(|source| SupervisorError::Watch {
            path: roots.first().cloned().unwrap_or_default(),
            source,
        })?;

        for root in roots {
            watcher
                .watch(root, RecursiveMode::Recursive)
                .map_err(|source| SupervisorError::Watch {
                    path: root.clone(),
                    source,
                })?;
            info!(path = %root.display(), "[sa-04] watching");
        }

        Ok(Self {
            rx,
            _watcher: Some(watcher),
        })
    }

    /// Stream fed by something other than a watcher, e.g. a test.
    pub fn from_channel(rx: mpsc::UnboundedReceiver<FsChange>) -> Self {
        Self { rx, _watcher: None }
    }

    /// Next change; `None` once the source is gone.
    pub async fn next(&mut self) -> Option<FsChange> {
        self.rx.recv().await
    }
}

/// Map a backend event onto one change per affected path.
pub fn classify(event: &Event) -> Vec<FsChange> {
    let kind = match event.kind {
        EventKind::Access(AccessKind::Close(AccessMode::Write)) => ChangeKind::WriteClosed,
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => ChangeKind::RenamedTo,
        _ => ChangeKind::Other,
    };
    event
        .paths
        .iter()
        .map(|path| FsChange::new(kind, path.clone()))
        .collect()
}
