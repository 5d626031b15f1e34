//! # Control Outcomes
//!
//! Response values of the control surface. Rejections are values so that
//! no verification failure can ever abort the service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of a submit or sign request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlOutcome {
    /// A new proposal was accepted, seeded with the submitter's signature.
    Accepted,
    /// A signature was added (or was already present).
    SignatureApproved,
    /// Signing was attempted with no active proposal.
    NoActiveProposal,
    /// Verification failed; carries the diagnostic.
    Unauthorized(String),
}

impl ControlOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Accepted | Self::SignatureApproved)
    }
}

impl fmt::Display for ControlOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted => f.write_str("Accepted"),
            Self::SignatureApproved => f.write_str("Signature Approved"),
            Self::NoActiveProposal => f.write_str(NO_ACTIVE_PROPOSAL),
            Self::Unauthorized(diagnostic) => write!(f, "Unauthorized: {}", diagnostic),
        }
    }
}

/// Marker returned whenever a proposal is required but absent.
pub const NO_ACTIVE_PROPOSAL: &str = "No Active Proposal";

/// Snapshot served by the status endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// Display name of the turn-holder.
    pub current_turn_name: String,
    /// Signatures on the active proposal; `None` when there is no proposal.
    pub signature_count: Option<usize>,
    /// Signatures required for promotion.
    pub quorum_size: usize,
    /// Display names of the signers, in registry order.
    pub signer_names: Vec<String>,
}

impl StatusSnapshot {
    /// `"n"` or `"none"`, as rendered on the status page.
    pub fn signature_count_label(&self) -> String {
        self.signature_count
            .map(|n| n.to_string())
            .unwrap_or_else(|| "none".to_string())
    }
}
