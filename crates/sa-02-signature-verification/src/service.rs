//! # Signature Verification Service
//!
//! Application service layer that implements the `SignatureVerificationApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`SignatureVerificationApi`)
//! - Uses the outbound port (`DocumentVerifier`) to reach the signing tool
//! - Applies the mode rules (registered signer / expected signer)

use crate::domain::entities::VerificationMode;
use crate::domain::errors::VerificationError;
use crate::ports::inbound::SignatureVerificationApi;
use crate::ports::outbound::DocumentVerifier;
use sa_01_identity_registry::IdentityRegistry;
use shared_types::Identity;
use std::path::Path;
use tracing::info;

/// Signature Verification Service.
///
/// Delegates signature checking to the tool behind `V` and decides whether
/// the reported signer is acceptable for the requested mode.
pub struct VerificationService<V: DocumentVerifier> {
    tool: V,
}

impl<V: DocumentVerifier> VerificationService<V> {
    /// Create a new verification service.
    ///
    /// # Arguments
    /// * `tool` - the signing-tool adapter
    pub fn new(tool: V) -> Self {
        Self { tool }
    }

    /// Verify `document` under `mode`.
    pub async fn verify(
        &self,
        document: &Path,
        mode: &VerificationMode,
        registry: &IdentityRegistry,
    ) -> Result<Identity, VerificationError> {
        let signer = self.tool.verify(document).await?;
        accept_signer(signer, mode, registry)
    }
}

/// Apply the mode rule to a signer the tool already vouched for.
pub fn accept_signer(
    signer: Identity,
    mode: &VerificationMode,
    registry: &IdentityRegistry,
) -> Result<Identity, VerificationError> {
    match mode {
        VerificationMode::Constrained(expected) => require_expected(signer, expected),
        VerificationMode::Open if registry.contains(&signer) => Ok(signer),
        VerificationMode::Open => {
            info!(identity = %signer, "[sa-02] signer is not a registered participant");
            Err(VerificationError::UnknownSigner(signer))
        }
    }
}

fn require_expected(signer: Identity, expected: &Identity) -> Result<Identity, VerificationError> {
    if &signer == expected {
        return Ok(signer);
    }
    info!(expected = %expected, actual = %signer, "[sa-02] signer is not the turn-holder");
    Err(VerificationError::SignerMismatch {
        expected: expected.clone(),
        actual: signer,
    })
}

#[async_trait::async_trait]
impl<V: DocumentVerifier> SignatureVerificationApi for VerificationService<V> {
    async fn verify_open(
        &self,
        document: &Path,
        registry: &IdentityRegistry,
    ) -> Result<Identity, VerificationError> {
        self.verify(document, &VerificationMode::Open, registry).await
    }

    async fn verify_constrained(
        &self,
        document: &Path,
        expected: &Identity,
    ) -> Result<Identity, VerificationError> {
        let signer = self.tool.verify(document).await?;
        require_expected(signer, expected)
    }

    async fn extract_payload(&self, document: &Path) -> Result<Vec<u8>, VerificationError> {
        self.tool.extract_payload(document).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::Participant;

    /// Tool double that reports a fixed signer (or a fixed failure).
    struct FixedTool(Result<Identity, VerificationError>);

    #[async_trait::async_trait]
    impl DocumentVerifier for FixedTool {
        async fn verify(&self, _document: &Path) -> Result<Identity, VerificationError> {
            self.0.clone()
        }

        async fn extract_payload(&self, _document: &Path) -> Result<Vec<u8>, VerificationError> {
            Ok(b"payload".to_vec())
        }
    }

    fn registry() -> IdentityRegistry {
        IdentityRegistry::new(vec![
            Participant::new("Ted", "K1"),
            Participant::new("Ann", "K2"),
        ])
        .unwrap()
    }

    fn service(signer: &str) -> VerificationService<FixedTool> {
        VerificationService::new(FixedTool(Ok(Identity::new(signer))))
    }

    #[tokio::test]
    async fn test_open_accepts_registered_signer() {
        let id = service("K2")
            .verify_open(Path::new("doc"), &registry())
            .await
            .unwrap();
        assert_eq!(id, Identity::new("K2"));
    }

    #[tokio::test]
    async fn test_open_rejects_unregistered_signer() {
        let err = service("K9")
            .verify_open(Path::new("doc"), &registry())
            .await
            .unwrap_err();
        assert_eq!(err, VerificationError::UnknownSigner(Identity::new("K9")));
    }

    #[tokio::test]
    async fn test_constrained_accepts_expected_signer() {
        let id = service("K1")
            .verify_constrained(Path::new("doc"), &Identity::new("K1"))
            .await
            .unwrap();
        assert_eq!(id, Identity::new("K1"));
    }

    #[tokio::test]
    async fn test_constrained_rejects_other_signer() {
        let err = service("K2")
            .verify_constrained(Path::new("doc"), &Identity::new("K1"))
            .await
            .unwrap_err();
        assert!(matches!(err, VerificationError::SignerMismatch { .. }));
        assert_eq!(err.to_string(), "K2");
    }

    #[tokio::test]
    async fn test_tool_failure_propagates() {
        let failing = VerificationService::new(FixedTool(Err(VerificationError::NoGoodSignature(
            "gpg: BAD signature".into(),
        ))));
        let err = failing
            .verify_open(Path::new("doc"), &registry())
            .await
            .unwrap_err();
        assert!(matches!(err, VerificationError::NoGoodSignature(_)));
    }

    #[test]
    fn test_accept_signer_modes() {
        let reg = registry();
        assert!(accept_signer(Identity::new("K1"), &VerificationMode::Open, &reg).is_ok());
        assert!(accept_signer(
            Identity::new("K1"),
            &VerificationMode::Constrained(Identity::new("K2")),
            &reg
        )
        .is_err());
    }
}
