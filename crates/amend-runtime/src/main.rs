//! # Self-Amend
//!
//! ```text
//! self-amend --service    control surface, refreshes the watchdog
//! self-amend --watchdog   restarts the service when the program changes
//! self-amend --cleanup    terminates both roles
//! ```
//!
//! Configuration is read from `SA_*` environment variables, see
//! [`amend_runtime::config::RuntimeConfig::from_env`].

use amend_runtime::roles::{run_cleanup, run_service, run_watchdog};
use amend_runtime::{Cli, Mode, RuntimeConfig};
use amend_telemetry::{init_logging, TelemetryConfig};
use anyhow::{Context, Result};
use clap::Parser;
use shared_types::Role;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mode = cli.mode();

    init_logging(&TelemetryConfig::for_role(mode.tag())).context("Failed to initialise logging")?;
    let config = RuntimeConfig::from_env().context("Invalid environment")?;

    match mode {
        Mode::Run(Role::Service) => run_service(config).await,
        Mode::Run(Role::Watchdog) => run_watchdog(config).await,
        Mode::Cleanup => run_cleanup(&config),
    }
}
