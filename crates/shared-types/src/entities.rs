//! # Core Domain Entities
//!
//! - **Participants**: [`Identity`], [`Participant`]
//! - **Supervision**: [`Role`]

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// PARTICIPANTS
// =============================================================================

/// Public-key fingerprint of a participant.
///
/// Surrounding whitespace is trimmed on construction; everything else is
/// compared byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Identity(String);

impl Identity {
    pub fn new(fingerprint: impl AsRef<str>) -> Self {
        Self(fingerprint.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Identity {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Identity {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<Identity> for String {
    fn from(value: Identity) -> Self {
        value.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered participant: human-facing name plus signing identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Name shown on the status page.
    pub display_name: String,
    /// Fingerprint of the participant's signing key.
    pub identity: Identity,
}

impl Participant {
    pub fn new(display_name: impl Into<String>, identity: impl Into<Identity>) -> Self {
        Self {
            display_name: display_name.into(),
            identity: identity.into(),
        }
    }
}

// =============================================================================
// SUPERVISION
// =============================================================================

/// Execution mode of the self-amending executable.
///
/// A running process is attributed to a role solely by the flag in its
/// invocation, see `sa-04-process-supervisor::domain::matcher`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Runs the control surface from the current authoritative program.
    Service,
    /// Watches the authoritative program and restarts the service.
    Watchdog,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Service, Role::Watchdog];

    /// Substring searched for in a candidate's role flag.
    pub fn tag(self) -> &'static str {
        match self {
            Role::Service => "service",
            Role::Watchdog => "watchdog",
        }
    }

    /// The single argument a process of this role is launched with.
    pub fn flag(self) -> String {
        format!("--{}", self.tag())
    }

    /// The role each role re-establishes.
    pub fn counterpart(self) -> Role {
        match self {
            Role::Service => Role::Watchdog,
            Role::Watchdog => Role::Service,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
