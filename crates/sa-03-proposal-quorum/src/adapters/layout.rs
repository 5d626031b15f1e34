//! # State Directory Layout
//!
//! ```text
//! <state_dir>/
//! ├── self-amend          # authoritative program (default location)
//! ├── self-amend.staged   # promotion staging copy (next to the program)
//! ├── pending-proposal    # upload being verified (transient)
//! ├── proposal            # verified, signature-stripped proposal
//! ├── signatures.json     # signers of the proposal + its digest
//! ├── playerindex         # turn index (absent = 0)
//! ├── promotion.journal   # target turn of an in-flight promotion
//! └── LOCK                # held by the running service
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Paths of every persisted piece of state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateLayout {
    state_dir: PathBuf,
    program: PathBuf,
}

impl StateLayout {
    /// Layout rooted at `state_dir` with the authoritative program at `program`.
    pub fn new(state_dir: impl Into<PathBuf>, program: impl Into<PathBuf>) -> Self {
        Self {
            state_dir: state_dir.into(),
            program: program.into(),
        }
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    /// The authoritative program file.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Staging copy used by promotion; same directory as the program so the
    /// final rename stays on one filesystem.
    pub fn staged_program(&self) -> PathBuf {
        let mut name = self
            .program
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("program"));
        name.push(".staged");
        self.program.with_file_name(name)
    }

    pub fn pending_upload(&self) -> PathBuf {
        self.state_dir.join("pending-proposal")
    }

    pub fn proposal(&self) -> PathBuf {
        self.state_dir.join("proposal")
    }

    pub fn signatures(&self) -> PathBuf {
        self.state_dir.join("signatures.json")
    }

    pub fn turn_index(&self) -> PathBuf {
        self.state_dir.join("playerindex")
    }

    pub fn promotion_journal(&self) -> PathBuf {
        self.state_dir.join("promotion.journal")
    }
}
