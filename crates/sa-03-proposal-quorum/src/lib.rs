//! # Proposal & Quorum Subsystem (SA-03)
//!
//! Persisted game state of the self-amending service: the pending upload,
//! the active proposal, the signatures endorsing it, whose turn it is, and
//! the promotion that replaces the authoritative program.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): quorum rule, turn arithmetic, signature
//!   set, response values
//! - **Ports Layer** (`ports/`): the control surface consumed by the HTTP
//!   front-end
//! - **Adapters Layer** (`adapters/`): state-directory files, process lock,
//!   pending-upload scratch file
//! - **State** (`state.rs`): `GameState`, the single aggregate holding all
//!   mutable state, and the promotion commit protocol
//! - **Service Layer** (`service.rs`): `QuorumService`, which serialises
//!   every mutation behind one lock
//!
//! ## Invariants
//!
//! - Nothing reaches the proposal file before its upload verified.
//! - Proposal and signature set are replaced together; a persisted signature
//!   set only counts for the proposal whose digest it records.
//! - Promotion happens iff every registered participant has signed, and it
//!   moves turn, program, proposal and signatures as one recoverable step.
//! - The turn only advances through promotion.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;
pub mod state;

#[cfg(test)]
pub(crate) mod test_utils;

pub use adapters::layout::StateLayout;
pub use adapters::lock::{LockError, StateLock, DEFAULT_LOCK_TIMEOUT};
pub use domain::errors::StoreError;
pub use domain::outcome::{ControlOutcome, StatusSnapshot, NO_ACTIVE_PROPOSAL};
pub use domain::quorum::{next_turn, normalize_turn, quorum_reached};
pub use domain::signatures::SignatureSet;
pub use ports::inbound::ControlSurface;
pub use service::QuorumService;
pub use state::{GameState, Promotion, StoreOptions};
