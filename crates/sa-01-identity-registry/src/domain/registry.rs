//! Participant registry
//!
//! The ordered participant list is authoritative; the identity → position
//! map is derived from it for lookups.

use super::errors::RegistryError;
use shared_types::{Identity, Participant};
use std::collections::HashMap;
use std::path::Path;

/// Ordered, immutable list of participants.
#[derive(Debug, Clone)]
pub struct IdentityRegistry {
    participants: Vec<Participant>,
    lookup: HashMap<Identity, usize>,
}

impl IdentityRegistry {
    /// Build a registry, rejecting empty lists and duplicate identities.
    pub fn new(participants: Vec<Participant>) -> Result<Self, RegistryError> {
        if participants.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut lookup = HashMap::with_capacity(participants.len());
        for (index, participant) in participants.iter().enumerate() {
            if participant.identity.is_empty() {
                return Err(RegistryError::EmptyIdentity {
                    display_name: participant.display_name.clone(),
                });
            }
            if lookup.insert(participant.identity.clone(), index).is_some() {
                return Err(RegistryError::DuplicateIdentity(
                    participant.identity.clone(),
                ));
            }
        }

        Ok(Self {
            participants,
            lookup,
        })
    }

    /// Load a registry from a JSON array of `{display_name, identity}`.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let raw = std::fs::read(path).map_err(|source| RegistryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let participants: Vec<Participant> =
            serde_json::from_slice(&raw).map_err(|source| RegistryError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        Self::new(participants)
    }

    /// Find the participant holding `identity`.
    pub fn lookup_by_identity(&self, identity: &Identity) -> Option<&Participant> {
        self.lookup
            .get(identity)
            .map(|&index| &self.participants[index])
    }

    pub fn contains(&self, identity: &Identity) -> bool {
        self.lookup.contains_key(identity)
    }

    /// Display name for `identity`, if registered.
    pub fn display_name(&self, identity: &Identity) -> Option<&str> {
        self.lookup_by_identity(identity)
            .map(|p| p.display_name.as_str())
    }

    /// Participant at `turn_index`.
    ///
    /// An out-of-range index degrades to the first participant instead of
    /// failing.
    pub fn current(&self, turn_index: usize) -> &Participant {
        self.participants
            .get(turn_index)
            .unwrap_or(&self.participants[0])
    }

    /// Number of distinct signatures required for promotion.
    pub fn quorum_size(&self) -> usize {
        self.participants.len()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Always `false`; construction rejects empty registries.
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }
}
