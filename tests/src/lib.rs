//! # Self-Amend Test Suite
//!
//! Scenarios that cross crate boundaries. Each crate keeps its own unit
//! tests; this crate wires the real services together with a scripted
//! signing tool and in-memory process doubles.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs          # scripted signing tool, state directories
//!     ├── amendment_flow.rs    # submit/sign/promote through the real services
//!     ├── gateway_flow.rs      # HTTP surface over a real quorum service
//!     └── supervision_flow.rs  # role isolation and restart on promotion
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p sa-tests
//! cargo test -p sa-tests integration::amendment_flow
//! ```

pub mod integration;
