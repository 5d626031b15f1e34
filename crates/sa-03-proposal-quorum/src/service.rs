//! # Quorum Service
//!
//! Implements [`ControlSurface`] over a [`GameState`]. Every operation,
//! reads included, takes the same lock, so submit/sign/promote never
//! interleave and status never observes a half-applied transition.

use crate::domain::errors::StoreError;
use crate::domain::outcome::{ControlOutcome, StatusSnapshot};
use crate::ports::inbound::ControlSurface;
use crate::state::GameState;
use sa_02_signature_verification::SignatureVerificationApi;
use tokio::sync::Mutex;

/// The Quorum Service.
pub struct QuorumService<V: SignatureVerificationApi> {
    state: Mutex<GameState>,
    verifier: V,
}

impl<V: SignatureVerificationApi> QuorumService<V> {
    pub fn new(state: GameState, verifier: V) -> Self {
        Self {
            state: Mutex::new(state),
            verifier,
        }
    }

    /// Exclusive access to the state, for startup checks and tests.
    pub async fn state(&self) -> tokio::sync::MutexGuard<'_, GameState> {
        self.state.lock().await
    }
}

#[async_trait::async_trait]
impl<V: SignatureVerificationApi> ControlSurface for QuorumService<V> {
    async fn status(&self) -> StatusSnapshot {
        self.state.lock().await.status()
    }

    async fn source(&self) -> Result<Vec<u8>, StoreError> {
        let state = self.state.lock().await;
        let program = state.layout().program();
        std::fs::read(program).map_err(|e| StoreError::Io {
            path: program.to_path_buf(),
            source: e,
        })
    }

    async fn proposal(&self) -> Result<Option<Vec<u8>>, StoreError> {
        self.state.lock().await.read_proposal()
    }

    async fn sign(&self, document: &[u8]) -> Result<ControlOutcome, StoreError> {
        let mut state = self.state.lock().await;
        state.sign_proposal(&self.verifier, document).await
    }

    async fn submit(&self, document: &[u8]) -> Result<ControlOutcome, StoreError> {
        let mut state = self.state.lock().await;
        state.submit_proposal(&self.verifier, document).await
    }
}
