//! # Shared Types Crate
//!
//! Types shared by every Self-Amend subsystem.
//!
//! ## Design Principles
//!
//! - **Opaque Identity**: a participant is identified by the key fingerprint
//!   reported by the signing tool. It is never parsed, only compared.
//! - **Role by Tag**: the two supervisor roles only ever refer to each other
//!   through their [`Role`] tag, never through shared objects.

pub mod entities;

pub use entities::*;
