//! # Outbound Ports (Driven Ports / SPI)
//!
//! The external signing tool, seen as two operations over a document file.

use crate::domain::errors::VerificationError;
use shared_types::Identity;
use std::path::Path;

/// Gateway to the external signing tool.
#[async_trait::async_trait]
pub trait DocumentVerifier: Send + Sync {
    /// Check the document's signature and report who made it.
    ///
    /// # Errors
    /// * `ToolFailed`, `NoGoodSignature`, `UnparsableSigner` - rejected
    /// * `Timeout`, `Io` - the tool could not give an answer
    async fn verify(&self, document: &Path) -> Result<Identity, VerificationError>;

    /// Strip the signature wrapper and return the signed payload.
    async fn extract_payload(&self, document: &Path) -> Result<Vec<u8>, VerificationError>;
}
