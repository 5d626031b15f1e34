//! Termination signals.

use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::watch;
use tracing::{info, warn};

/// Resolves on the first SIGINT or SIGTERM.
pub async fn shutdown_signal(tag: &'static str) {
    let ctrl_c = tokio::signal::ctrl_c();
    match signal(SignalKind::terminate()) {
        Ok(mut terminate) => {
            tokio::select! {
                _ = ctrl_c => {}
                _ = terminate.recv() => {}
            }
        }
        Err(e) => {
            warn!("[{}] SIGTERM handler unavailable: {}", tag, e);
            let _ = ctrl_c.await;
        }
    }
    info!("[{}] Shutdown signal received", tag);
}

/// Watch channel that flips to `true` on the first termination signal.
pub fn shutdown_channel(tag: &'static str) -> watch::Receiver<bool> {
    let (tx, rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal(tag).await;
        let _ = tx.send(true);
    });
    rx
}
