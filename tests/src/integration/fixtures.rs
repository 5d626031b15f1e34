//! Shared fixtures.
//!
//! The signing tool is replaced at its outbound port, so the real
//! `VerificationService` mode rules still run. A document is signed when it
//! reads `SIGNED:<identity>\n<payload>`.

use sa_01_identity_registry::IdentityRegistry;
use sa_02_signature_verification::{DocumentVerifier, VerificationError, VerificationService};
use sa_03_proposal_quorum::{GameState, QuorumService, StateLayout, StoreOptions};
use shared_types::{Identity, Participant};
use std::path::Path;
use tempfile::TempDir;

pub const ORIGINAL: &[u8] = b"#!/bin/sh\necho v1\n";

pub struct ScriptedGpg;

impl ScriptedGpg {
    fn read(document: &Path) -> Result<(Identity, Vec<u8>), VerificationError> {
        let bytes = std::fs::read(document).map_err(|e| VerificationError::Io(e.to_string()))?;
        let Some(split) = bytes.iter().position(|&b| b == b'\n') else {
            return Err(VerificationError::NoGoodSignature(
                "gpg: no valid OpenPGP data found.".into(),
            ));
        };
        let header = String::from_utf8_lossy(&bytes[..split]).into_owned();
        let Some(identity) = header.strip_prefix("SIGNED:") else {
            return Err(VerificationError::ToolFailed {
                status: Some(2),
                diagnostic: "gpg: BAD signature".into(),
            });
        };
        Ok((Identity::new(identity), bytes[split + 1..].to_vec()))
    }
}

#[async_trait::async_trait]
impl DocumentVerifier for ScriptedGpg {
    async fn verify(&self, document: &Path) -> Result<Identity, VerificationError> {
        Ok(Self::read(document)?.0)
    }

    async fn extract_payload(&self, document: &Path) -> Result<Vec<u8>, VerificationError> {
        Ok(Self::read(document)?.1)
    }
}

pub type TestService = QuorumService<VerificationService<ScriptedGpg>>;

pub fn signed(identity: &str, payload: &[u8]) -> Vec<u8> {
    let mut doc = format!("SIGNED:{}\n", identity).into_bytes();
    doc.extend_from_slice(payload);
    doc
}

/// Ted (K1), Ann (K2), Bob (K3).
pub fn three_players() -> IdentityRegistry {
    players(&[("Ted", "K1"), ("Ann", "K2"), ("Bob", "K3")])
}

pub fn players(list: &[(&str, &str)]) -> IdentityRegistry {
    IdentityRegistry::new(
        list.iter()
            .map(|(name, id)| Participant::new(*name, *id))
            .collect(),
    )
    .unwrap()
}

/// A state directory holding the original program.
pub fn state_dir() -> (TempDir, StateLayout) {
    let dir = tempfile::tempdir().unwrap();
    let layout = StateLayout::new(dir.path(), dir.path().join("self-amend"));
    std::fs::write(layout.program(), ORIGINAL).unwrap();
    (dir, layout)
}

/// Open a service the way a fresh service process does.
pub fn open_service(registry: IdentityRegistry, layout: StateLayout) -> TestService {
    let state = GameState::open(registry, layout, StoreOptions::default()).unwrap();
    QuorumService::new(state, VerificationService::new(ScriptedGpg))
}
