//! SA-05 Control Gateway - HTTP front-end of the self-amending service.
//!
//! # Architecture
//!
//! ```text
//!   browser / curl
//!        │
//!  ┌─────┴──────────────────────────────────────────┐
//!  │  axum Router                                   │
//!  │   GET  /  /status  /source  /proposal          │
//!  │   GET  /sign  /submit           (upload forms) │
//!  │   POST /sign  /submit           (raw body)     │
//!  │   POST /upload/sign  /upload/submit (multipart)│
//!  └─────┬──────────────────────────────────────────┘
//!        │  ControlSurface (sa-03)
//!        ▼
//!   QuorumService ── GameState ── state directory
//! ```
//!
//! The gateway never touches state files; every request goes through the
//! [`ControlSurface`] port.
//!
//! [`ControlSurface`]: sa_03_proposal_quorum::ControlSurface

#![deny(unsafe_code)]

pub mod domain;
pub mod pages;
pub mod router;
pub mod service;

pub use domain::config::GatewayConfig;
pub use domain::error::{ApiError, GatewayError};
pub use router::build_router;
pub use service::ControlGateway;
