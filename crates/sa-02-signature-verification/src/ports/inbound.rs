//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of this subsystem.

use crate::domain::errors::VerificationError;
use sa_01_identity_registry::IdentityRegistry;
use shared_types::Identity;
use std::path::Path;

/// Primary Signature Verification API.
///
/// Implementations must be thread-safe (`Send + Sync`).
#[async_trait::async_trait]
pub trait SignatureVerificationApi: Send + Sync {
    /// Verify `document` and accept any signer registered in `registry`.
    ///
    /// Used when endorsing an existing proposal.
    async fn verify_open(
        &self,
        document: &Path,
        registry: &IdentityRegistry,
    ) -> Result<Identity, VerificationError>;

    /// Verify `document` and accept only `expected` as signer.
    ///
    /// Used when originating a proposal: only the turn-holder may submit.
    async fn verify_constrained(
        &self,
        document: &Path,
        expected: &Identity,
    ) -> Result<Identity, VerificationError>;

    /// Return the payload of `document` with the signature wrapper removed.
    ///
    /// # Contract
    /// Callers invoke this only after one of the verify calls succeeded for
    /// the same document.
    async fn extract_payload(&self, document: &Path) -> Result<Vec<u8>, VerificationError>;
}
