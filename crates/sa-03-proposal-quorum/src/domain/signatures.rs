//! # Signature Set
//!
//! Distinct identities endorsing the active proposal, persisted together
//! with the SHA-256 digest of that proposal so that a stale file can never
//! count toward a different proposal.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shared_types::Identity;
use std::collections::BTreeSet;

/// Set of identities that signed off on the active proposal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureSet {
    signers: BTreeSet<Identity>,
}

impl SignatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set holding only the submitter's own signature.
    pub fn seeded(submitter: Identity) -> Self {
        let mut set = Self::new();
        set.insert(submitter);
        set
    }

    /// Add `identity`; returns `false` if it had already signed.
    pub fn insert(&mut self, identity: Identity) -> bool {
        self.signers.insert(identity)
    }

    pub fn contains(&self, identity: &Identity) -> bool {
        self.signers.contains(identity)
    }

    /// Drop every signer `keep` rejects; returns how many were removed.
    pub fn retain(&mut self, mut keep: impl FnMut(&Identity) -> bool) -> usize {
        let before = self.signers.len();
        self.signers.retain(|id| keep(id));
        before - self.signers.len()
    }

    pub fn clear(&mut self) {
        self.signers.clear();
    }

    pub fn len(&self) -> usize {
        self.signers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Identity> {
        self.signers.iter()
    }
}

/// On-disk form of a signature set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureRecord {
    /// Hex SHA-256 of the proposal these signatures endorse.
    pub proposal_sha256: String,
    pub signers: BTreeSet<Identity>,
}

impl SignatureRecord {
    pub fn new(proposal: &[u8], set: &SignatureSet) -> Self {
        Self {
            proposal_sha256: proposal_digest(proposal),
            signers: set.signers.clone(),
        }
    }

    /// The recorded set, if it belongs to `proposal`.
    pub fn for_proposal(self, proposal: &[u8]) -> Option<SignatureSet> {
        (self.proposal_sha256 == proposal_digest(proposal)).then_some(SignatureSet {
            signers: self.signers,
        })
    }
}

/// Hex-encoded SHA-256 of proposal content.
pub fn proposal_digest(proposal: &[u8]) -> String {
    hex::encode(Sha256::digest(proposal))
}
