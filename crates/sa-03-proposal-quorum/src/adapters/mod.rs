//! # Adapters Module
//!
//! Infrastructure adapters for the state directory.
//!
//! - `layout`: where each piece of state lives
//! - `files`: durable whole-file writes and tolerant reads
//! - `lock`: process-level exclusive ownership of the directory
//! - `pending`: the transient pending-upload scratch file

pub mod files;
pub mod layout;
pub mod lock;
pub mod pending;
