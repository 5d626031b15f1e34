//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API that the proposal store uses
//! - **Outbound (Driven)**: the signing tool this subsystem drives

pub mod inbound;
pub mod outbound;
