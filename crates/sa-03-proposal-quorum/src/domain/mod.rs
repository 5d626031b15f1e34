//! # Domain Layer
//!
//! Pure quorum and turn logic with no I/O dependencies.

pub mod errors;
pub mod outcome;
pub mod quorum;
pub mod signatures;
