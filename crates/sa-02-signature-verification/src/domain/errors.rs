//! # Verification Errors
//!
//! Every variant is a recoverable rejection: callers turn it into an
//! `Unauthorized: ...` response and leave persisted state untouched.

use shared_types::Identity;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during document verification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerificationError {
    /// The tool exited unsuccessfully.
    #[error("{diagnostic}")]
    ToolFailed {
        status: Option<i32>,
        diagnostic: String,
    },

    /// The tool succeeded but did not report a good signature.
    #[error("{0}")]
    NoGoodSignature(String),

    /// A good signature was reported but the signer could not be read.
    #[error("unable to determine signer: {0}")]
    UnparsableSigner(String),

    /// Constrained mode: the document was signed by someone else.
    #[error("{actual}")]
    SignerMismatch { expected: Identity, actual: Identity },

    /// Open mode: the signer is not a registered participant.
    #[error("{0}")]
    UnknownSigner(Identity),

    /// The signed payload is not the content being endorsed.
    #[error("signed content by {0} does not match the active proposal")]
    PayloadMismatch(Identity),

    /// The tool did not finish within the configured bound.
    #[error("verification timed out after {0:?}")]
    Timeout(Duration),

    /// The tool could not be started or the document could not be staged.
    #[error("verification tool unavailable: {0}")]
    Io(String),
}

impl VerificationError {
    /// True when the failure says nothing about the signature itself.
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Io(_))
    }
}
