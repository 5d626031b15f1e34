//! Test doubles for the signature tool.
//!
//! Signed documents are plain text of the form `SIGNED:<identity>\n<payload>`.
//! Anything else is treated as a bad signature.

use sa_01_identity_registry::IdentityRegistry;
use sa_02_signature_verification::{SignatureVerificationApi, VerificationError};
use shared_types::{Identity, Participant};
use std::path::Path;

pub fn signed(identity: &str, payload: &[u8]) -> Vec<u8> {
    let mut doc = format!("SIGNED:{}\n", identity).into_bytes();
    doc.extend_from_slice(payload);
    doc
}

pub fn registry(names: &[(&str, &str)]) -> IdentityRegistry {
    IdentityRegistry::new(
        names
            .iter()
            .map(|(name, id)| Participant::new(*name, *id))
            .collect(),
    )
    .unwrap()
}

/// Verifier that reads the `SIGNED:` header instead of calling gpg.
#[derive(Default)]
pub struct ScriptedVerifier;

impl ScriptedVerifier {
    fn read(document: &Path) -> Result<(Identity, Vec<u8>), VerificationError> {
        let bytes = std::fs::read(document).map_err(|e| VerificationError::Io(e.to_string()))?;
        let split = bytes.iter().position(|&b| b == b'\n').unwrap_or(bytes.len());
        let header = String::from_utf8_lossy(&bytes[..split]).to_string();
        let identity = header
            .strip_prefix("SIGNED:")
            .ok_or_else(|| VerificationError::NoGoodSignature("gpg: no valid OpenPGP data found.".into()))?;
        let payload = bytes.get(split + 1..).unwrap_or_default().to_vec();
        Ok((Identity::new(identity), payload))
    }
}

#[async_trait::async_trait]
impl SignatureVerificationApi for ScriptedVerifier {
    async fn verify_open(
        &self,
        document: &Path,
        registry: &IdentityRegistry,
    ) -> Result<Identity, VerificationError> {
        let (signer, _) = Self::read(document)?;
        if registry.contains(&signer) {
            Ok(signer)
        } else {
            Err(VerificationError::UnknownSigner(signer))
        }
    }

    async fn verify_constrained(
        &self,
        document: &Path,
        expected: &Identity,
    ) -> Result<Identity, VerificationError> {
        let (signer, _) = Self::read(document)?;
        if &signer == expected {
            Ok(signer)
        } else {
            Err(VerificationError::SignerMismatch {
                expected: expected.clone(),
                actual: signer,
            })
        }
    }

    async fn extract_payload(&self, document: &Path) -> Result<Vec<u8>, VerificationError> {
        Ok(Self::read(document)?.1)
    }
}
