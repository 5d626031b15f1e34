//! # Amend Telemetry
//!
//! Logging for every role of the self-amending executable.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use amend_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::for_role("service");
//! init_logging(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SA_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `SA_JSON_LOGS` | `false` | One JSON object per line |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    Filter(String),

    #[error("Failed to install subscriber: {0}")]
    Install(String),
}
