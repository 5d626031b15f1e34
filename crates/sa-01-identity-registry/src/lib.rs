//! # Identity Registry Subsystem (SA-01)
//!
//! The ordered, deployment-time list of participants.
//!
//! ## Invariants
//!
//! - The registry is never empty.
//! - Identities are unique.
//! - Order defines turn rotation; a registry of N participants requires N
//!   signatures (unanimity) for promotion.
//!
//! The registry is read-only once constructed. Changing the participants
//! means deploying a new registry file, which is outside the running
//! system's reach.

pub mod domain;

pub use domain::errors::RegistryError;
pub use domain::registry::IdentityRegistry;
