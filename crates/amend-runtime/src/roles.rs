//! # Role Entry Points
//!
//! ## Service
//!
//! 1. Validate configuration and load the participant registry
//! 2. Replace the watchdog with a fresh detached one (fatal on failure)
//! 3. Take the state-directory lock (waits for a predecessor being killed)
//! 4. Recover any interrupted promotion and open the game state
//! 5. Serve the control surface until SIGINT/SIGTERM
//!
//! ## Watchdog
//!
//! 1. Start watching the state directory and the program's directory
//! 2. Launch a service if none is running
//! 3. Restart the service on every completed write of the program
//!
//! ## Cleanup
//!
//! Terminate every process of either role.

use crate::config::RuntimeConfig;
use crate::signals::{shutdown_channel, shutdown_signal};
use anyhow::{Context, Result};
use sa_01_identity_registry::IdentityRegistry;
use sa_02_signature_verification::{GpgVerifier, VerificationService};
use sa_03_proposal_quorum::{GameState, QuorumService, StateLock, DEFAULT_LOCK_TIMEOUT};
use sa_04_process_supervisor::{
    watch_roots, ChangeStream, DetachedLauncher, ProcFsTable, RoleMatcher, Supervisor, Watchdog,
};
use sa_05_control_gateway::ControlGateway;
use shared_types::Role;
use std::sync::Arc;
use tracing::info;

pub type ProcessSupervisor = Supervisor<ProcFsTable, DetachedLauncher>;

/// Supervisor over the live process table, launching children in the
/// state directory.
pub fn supervisor(config: &RuntimeConfig) -> ProcessSupervisor {
    let runtime = config.runtime();
    let matcher = RoleMatcher::new(&runtime);
    let launcher = DetachedLauncher::new(runtime).with_working_dir(&config.state_dir);
    Supervisor::new(ProcFsTable::new(), launcher, matcher)
}

pub async fn run_service(config: RuntimeConfig) -> Result<()> {
    config.validate().context("Invalid configuration")?;
    let registry = IdentityRegistry::load(&config.participants_file).with_context(|| {
        format!(
            "Failed to load participants from {}",
            config.participants_file.display()
        )
    })?;
    info!(
        participants = registry.len(),
        state_dir = %config.state_dir.display(),
        program = %config.program.display(),
        "[sa-03] configuration loaded"
    );

    supervisor(&config)
        .refresh(Role::Watchdog)
        .context("Failed to re-establish the watchdog")?;

    let state_dir = config.state_dir.clone();
    let _lock = tokio::task::spawn_blocking(move || {
        StateLock::acquire(&state_dir, DEFAULT_LOCK_TIMEOUT)
    })
    .await
    .context("State lock task failed")?
    .context("Failed to lock the state directory")?;

    let state = GameState::open(registry, config.layout(), config.store_options())
        .context("Failed to open game state")?;
    let verifier = VerificationService::new(GpgVerifier::new(config.gpg()));
    let surface = Arc::new(QuorumService::new(state, verifier));

    ControlGateway::new(config.gateway(), surface)?
        .serve(shutdown_signal("sa-05"))
        .await?;

    info!("[sa-05] service stopped");
    Ok(())
}

pub async fn run_watchdog(config: RuntimeConfig) -> Result<()> {
    config.validate().context("Invalid configuration")?;

    let (roots, program) = watch_roots(&config.state_dir, &config.program)
        .context("Failed to resolve watched paths")?;
    let changes = ChangeStream::watch(&roots)?;

    let watchdog = Watchdog::new(supervisor(&config), program);
    watchdog
        .supervisor()
        .ensure(Role::Service)
        .context("Failed to launch the service")?;

    watchdog.run(changes, shutdown_channel("sa-04")).await?;
    Ok(())
}

pub fn run_cleanup(config: &RuntimeConfig) -> Result<()> {
    let killed = supervisor(config)
        .cleanup()
        .context("Failed to enumerate processes")?;
    info!(killed, "[sa-04] cleanup complete");
    Ok(())
}
