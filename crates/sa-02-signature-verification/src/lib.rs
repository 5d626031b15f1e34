//! # Signature Verification Subsystem (SA-02)
//!
//! Verifies signed documents with an external signing tool and reports the
//! signer's identity.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): tool-output parsing and error taxonomy, no I/O
//! - **Ports Layer** (`ports/`): the verification API and the tool it drives
//! - **Adapters Layer** (`adapters/`): `gpg` subprocess adapter
//! - **Service Layer** (`service.rs`): open and constrained verification modes
//!
//! ## Security Notes
//!
//! - **Verify Before Extract**: the signature-stripped payload is only ever
//!   produced after the same document verified successfully.
//! - **Bounded Tool Calls**: every tool invocation runs under a timeout; a
//!   timeout is reported separately from a rejected signature.
//! - **Registry Gate**: open verification still rejects signers that are not
//!   registered participants.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::gpg::{GpgConfig, GpgVerifier};
pub use domain::entities::{ToolOutput, VerificationMode};
pub use domain::errors::VerificationError;
pub use ports::inbound::SignatureVerificationApi;
pub use ports::outbound::DocumentVerifier;
pub use service::VerificationService;
