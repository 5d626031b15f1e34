//! # Domain Layer
//!
//! Pure registry logic. File loading is the only I/O.

pub mod errors;
pub mod registry;
