//! # Registry Errors

use shared_types::Identity;
use thiserror::Error;

/// Errors raised while building or loading the registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// At least one participant is required.
    #[error("Identity registry is empty")]
    Empty,

    /// Two participants share a signing identity.
    #[error("Duplicate identity in registry: {0}")]
    DuplicateIdentity(Identity),

    /// A participant has a blank identity.
    #[error("Participant {display_name:?} has an empty identity")]
    EmptyIdentity { display_name: String },

    /// The registry file could not be read.
    #[error("Failed to read registry file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The registry file is not a JSON participant list.
    #[error("Malformed registry file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
