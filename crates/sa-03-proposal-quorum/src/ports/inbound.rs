//! # Inbound Ports (Driving Ports / API)
//!
//! The contract between the HTTP front-end and the game state. The
//! front-end only calls these operations; it never touches state files.

use crate::domain::errors::StoreError;
use crate::domain::outcome::{ControlOutcome, StatusSnapshot};

/// Operations offered to the external front-end.
///
/// Verification failures and missing proposals come back as
/// [`ControlOutcome`] values; `Err` is reserved for state-directory failures.
#[async_trait::async_trait]
pub trait ControlSurface: Send + Sync {
    /// Turn-holder, signature progress and signers.
    async fn status(&self) -> StatusSnapshot;

    /// Current authoritative program bytes.
    async fn source(&self) -> Result<Vec<u8>, StoreError>;

    /// Active proposal bytes, or `None` when there is no active proposal.
    async fn proposal(&self) -> Result<Option<Vec<u8>>, StoreError>;

    /// Endorse the active proposal with a signed document.
    async fn sign(&self, document: &[u8]) -> Result<ControlOutcome, StoreError>;

    /// Replace the active proposal with a signed document from the turn-holder.
    async fn submit(&self, document: &[u8]) -> Result<ControlOutcome, StoreError>;
}
