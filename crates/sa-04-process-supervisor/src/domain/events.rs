//! # Filesystem Change Events
//!
//! Backend-neutral view of what happened to a path under the watched tree.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// A file opened for writing was closed.
    WriteClosed,
    /// A file was renamed onto this path.
    RenamedTo,
    /// Anything else (open, read, metadata, create, delete, ...).
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsChange {
    pub kind: ChangeKind,
    pub path: PathBuf,
}

impl FsChange {
    pub fn new(kind: ChangeKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }

    /// True iff this event completes a rewrite of `program`.
    ///
    /// Promotion replaces the program by rename; a manual copy closes a
    /// written file. Both count.
    pub fn completes_write_of(&self, program: &Path) -> bool {
        matches!(self.kind, ChangeKind::WriteClosed | ChangeKind::RenamedTo) && self.path == program
    }
}
