//! Adapters layer: OS process control, filesystem watching and test doubles.

pub mod launcher;
pub mod memory;
pub mod procfs;
pub mod watcher;
