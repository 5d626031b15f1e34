//! # Quorum and Turn Rules
//!
//! Promotion requires unanimity: at least as many distinct signatures as
//! registered participants, every one of them registered.

use super::signatures::SignatureSet;
use sa_01_identity_registry::IdentityRegistry;

/// True iff `signatures` is large enough and entirely registered.
pub fn quorum_reached(signatures: &SignatureSet, registry: &IdentityRegistry) -> bool {
    signatures.len() >= registry.quorum_size()
        && signatures.iter().all(|identity| registry.contains(identity))
}

/// Parse a persisted turn index, degrading to 0 when absent, unparsable or
/// out of range for a registry of `participants`.
pub fn normalize_turn(raw: Option<&str>, participants: usize) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&index| index < participants)
        .unwrap_or(0)
}

/// Turn following `current` in a registry of `participants`.
pub fn next_turn(current: usize, participants: usize) -> usize {
    if participants == 0 {
        return 0;
    }
    (current + 1) % participants
}
