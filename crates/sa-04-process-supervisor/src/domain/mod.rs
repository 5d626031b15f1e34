//! Domain layer: pure process and event logic, no I/O.

pub mod entities;
pub mod errors;
pub mod events;
pub mod matcher;
