//! # Adapters Module
//!
//! Infrastructure adapters implementing the outbound port.

pub mod gpg;
