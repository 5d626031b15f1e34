//! # Domain Entities
//!
//! Core data structures for document verification.

use shared_types::Identity;

/// Which signers a verification accepts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerificationMode {
    /// Any registered participant (endorsing an existing proposal).
    Open,
    /// Exactly this identity (originating a proposal on one's turn).
    Constrained(Identity),
}

/// Captured result of one signing-tool invocation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code; `None` if the tool was killed by a signal.
    pub status: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Diagnostic text shown to the caller: stderr followed by stdout.
    pub fn diagnostic(&self) -> String {
        let mut text = String::from_utf8_lossy(&self.stderr).into_owned();
        text.push_str(&String::from_utf8_lossy(&self.stdout));
        text
    }
}
