//! # Game State
//!
//! The single aggregate owning every piece of mutable state: turn, active
//! proposal, signature set and the pending upload. `QuorumService` keeps it
//! behind one lock; nothing else mutates the state directory.
//!
//! ## Promotion Commit Protocol
//!
//! ```text
//! 1. stage     proposal → <program>.staged  (fsync, program's file mode)
//! 2. journal   promotion.journal ← next turn        ── decision point
//! 3. turn      playerindex ← next turn
//! 4. clear     signatures.json removed
//! 5. commit    rename <program>.staged → <program>  ── watchdog reacts here
//! 6. consume   proposal removed
//! 7. done      promotion.journal removed
//! ```
//!
//! The watchdog may kill the service anywhere after step 5. `recover()` runs
//! at every service start: a journal means the promotion was decided and is
//! rolled forward; a staged file without a journal is discarded. A commit
//! step that fails in-process leaves the state interrupted: the next
//! mutation runs the same roll-forward first and errors until it succeeds.

use crate::adapters::files::{read_optional, remove_if_exists, write_atomic, write_synced};
use crate::adapters::layout::StateLayout;
use crate::adapters::pending::PendingUpload;
use crate::domain::errors::StoreError;
use crate::domain::outcome::{ControlOutcome, StatusSnapshot};
use crate::domain::quorum::{next_turn, normalize_turn, quorum_reached};
use crate::domain::signatures::{SignatureRecord, SignatureSet};
use sa_01_identity_registry::IdentityRegistry;
use sa_02_signature_verification::{SignatureVerificationApi, VerificationError};
use shared_types::Participant;
use std::path::Path;
use tracing::{debug, error, info, warn};

/// Behaviour switches of the store.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Require a signature's payload to equal the active proposal.
    pub bind_signatures: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            bind_signatures: true,
        }
    }
}

/// What a completed promotion changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Promotion {
    pub previous_turn: usize,
    pub turn: usize,
    pub program_bytes: usize,
}

/// Persisted turn index. Advanced only by promotion.
#[derive(Debug)]
struct TurnTracker {
    index: usize,
    participants: usize,
}

impl TurnTracker {
    fn load(layout: &StateLayout, participants: usize) -> Result<Self, StoreError> {
        let raw = read_optional(&layout.turn_index())?;
        let text = raw.as_deref().map(String::from_utf8_lossy);
        Ok(Self {
            index: normalize_turn(text.as_deref(), participants),
            participants,
        })
    }

    fn next(&self) -> usize {
        next_turn(self.index, self.participants)
    }

}

/// All mutable state of the self-amending service.
pub struct GameState {
    registry: IdentityRegistry,
    layout: StateLayout,
    options: StoreOptions,
    turn: TurnTracker,
    signatures: SignatureSet,
    /// Set when a journaled promotion failed part-way; the in-memory view is
    /// stale until the promotion is rolled forward.
    interrupted: bool,
}

impl GameState {
    /// Recover any interrupted promotion and load persisted state.
    pub fn open(
        registry: IdentityRegistry,
        layout: StateLayout,
        options: StoreOptions,
    ) -> Result<Self, StoreError> {
        Self::recover(&layout, registry.len())?;

        let turn = TurnTracker::load(&layout, registry.len())?;
        let signatures = Self::load_signatures(&layout, &registry)?;

        info!(
            participants = registry.len(),
            turn = turn.index,
            signatures = signatures.len(),
            "[sa-03] game state loaded"
        );

        Ok(Self {
            registry,
            layout,
            options,
            turn,
            signatures,
            interrupted: false,
        })
    }

    /// Complete or discard a promotion interrupted by a crash or restart,
    /// and drop any pending upload left behind.
    pub fn recover(layout: &StateLayout, participants: usize) -> Result<(), StoreError> {
        remove_if_exists(&layout.pending_upload())?;

        let staged = layout.staged_program();
        let journal_path = layout.promotion_journal();

        let Some(journal) = read_optional(&journal_path)? else {
            if staged.exists() {
                warn!(path = %staged.display(), "[sa-03] discarding undecided staged program");
                remove_if_exists(&staged)?;
            }
            return Ok(());
        };

        let journaled = String::from_utf8_lossy(&journal)
            .trim()
            .parse::<usize>()
            .map_err(|_| StoreError::Corrupt {
                path: journal_path.clone(),
                reason: "promotion journal does not hold a turn index".to_string(),
            })?;
        let turn = if journaled < participants.max(1) {
            journaled
        } else {
            warn!(
                journaled,
                participants,
                "[sa-03] journaled turn out of range, handing the turn to the first participant"
            );
            0
        };

        warn!(turn, "[sa-03] rolling forward interrupted promotion");
        Self::roll_forward(layout, turn)
    }

    /// Commit steps of a journaled promotion. Each step is idempotent so a
    /// partial run can be repeated.
    fn roll_forward(layout: &StateLayout, turn: usize) -> Result<(), StoreError> {
        write_atomic(&layout.turn_index(), turn.to_string().as_bytes())?;
        remove_if_exists(&layout.signatures())?;
        let staged = layout.staged_program();
        if staged.exists() {
            std::fs::rename(&staged, layout.program())
                .map_err(|e| StoreError::io(layout.program(), e))?;
        }
        remove_if_exists(&layout.proposal())?;
        remove_if_exists(&layout.promotion_journal())
    }

    /// Finish a promotion that failed part-way, then reload turn and
    /// signatures from disk. Mutations refuse to run until this succeeds.
    fn resume_interrupted(&mut self) -> Result<(), StoreError> {
        if !self.interrupted {
            return Ok(());
        }
        Self::recover(&self.layout, self.registry.len())?;
        self.turn = TurnTracker::load(&self.layout, self.registry.len())?;
        self.signatures = Self::load_signatures(&self.layout, &self.registry)?;
        self.interrupted = false;
        warn!(turn = self.turn.index, "[sa-03] interrupted promotion completed");
        Ok(())
    }

    fn load_signatures(
        layout: &StateLayout,
        registry: &IdentityRegistry,
    ) -> Result<SignatureSet, StoreError> {
        let Some(proposal) = read_optional(&layout.proposal())? else {
            remove_if_exists(&layout.signatures())?;
            return Ok(SignatureSet::new());
        };
        let Some(raw) = read_optional(&layout.signatures())? else {
            return Ok(SignatureSet::new());
        };

        let record: SignatureRecord = match serde_json::from_slice(&raw) {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "[sa-03] unreadable signature file, starting with no signatures");
                return Ok(SignatureSet::new());
            }
        };
        let Some(mut set) = record.for_proposal(&proposal) else {
            warn!("[sa-03] signature file belongs to a different proposal, ignoring it");
            return Ok(SignatureSet::new());
        };

        let removed = set.retain(|id| registry.contains(id));
        if removed > 0 {
            warn!(removed, "[sa-03] dropped signatures of unregistered identities");
        }
        Ok(set)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn registry(&self) -> &IdentityRegistry {
        &self.registry
    }

    pub fn layout(&self) -> &StateLayout {
        &self.layout
    }

    pub fn turn_index(&self) -> usize {
        self.turn.index
    }

    /// The turn-holder.
    pub fn current_player(&self) -> &Participant {
        self.registry.current(self.turn.index)
    }

    pub fn signatures(&self) -> &SignatureSet {
        &self.signatures
    }

    pub fn has_proposal(&self) -> bool {
        self.layout.proposal().exists()
    }

    pub fn read_proposal(&self) -> Result<Option<Vec<u8>>, StoreError> {
        read_optional(&self.layout.proposal())
    }

    pub fn status(&self) -> StatusSnapshot {
        let has_proposal = self.has_proposal();
        let signer_names = if has_proposal {
            self.registry
                .participants()
                .iter()
                .filter(|p| self.signatures.contains(&p.identity))
                .map(|p| p.display_name.clone())
                .collect()
        } else {
            Vec::new()
        };

        StatusSnapshot {
            current_turn_name: self.current_player().display_name.clone(),
            signature_count: has_proposal.then(|| self.signatures.len()),
            quorum_size: self.registry.quorum_size(),
            signer_names,
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Verify an upload from the turn-holder and make it the active proposal.
    pub async fn submit_proposal(
        &mut self,
        verifier: &dyn SignatureVerificationApi,
        upload: &[u8],
    ) -> Result<ControlOutcome, StoreError> {
        self.resume_interrupted()?;
        let pending = PendingUpload::create(self.layout.pending_upload(), upload)?;
        let expected = self.current_player().identity.clone();

        let submitter = match verifier.verify_constrained(pending.path(), &expected).await {
            Ok(identity) => identity,
            Err(e) => return Ok(reject("submit", e)),
        };
        let payload = match verifier.extract_payload(pending.path()).await {
            Ok(payload) => payload,
            Err(e) => return Ok(reject("submit", e)),
        };
        drop(pending);

        let seeded = SignatureSet::seeded(submitter.clone());
        write_atomic(&self.layout.proposal(), &payload)?;
        self.signatures.clear();
        self.persist_signatures(&payload, &seeded)?;
        self.signatures = seeded;

        info!(
            submitter = %submitter,
            bytes = payload.len(),
            "[sa-03] proposal accepted"
        );

        self.try_promote()?;
        Ok(ControlOutcome::Accepted)
    }

    /// Verify a signature from any participant and add it to the signature set.
    pub async fn sign_proposal(
        &mut self,
        verifier: &dyn SignatureVerificationApi,
        document: &[u8],
    ) -> Result<ControlOutcome, StoreError> {
        self.resume_interrupted()?;
        let Some(proposal) = self.read_proposal()? else {
            return Ok(ControlOutcome::NoActiveProposal);
        };

        let scratch = scratch_file(document)?;
        let signer = match verifier.verify_open(scratch.path(), &self.registry).await {
            Ok(identity) => identity,
            Err(e) => return Ok(reject("sign", e)),
        };

        if self.options.bind_signatures {
            match verifier.extract_payload(scratch.path()).await {
                Ok(payload) if payload == proposal => {}
                Ok(_) => return Ok(reject("sign", VerificationError::PayloadMismatch(signer))),
                Err(e) => return Ok(reject("sign", e)),
            }
        }

        if self.signatures.contains(&signer) {
            debug!(signer = %signer, "[sa-03] duplicate signature ignored");
            return Ok(ControlOutcome::SignatureApproved);
        }

        let mut updated = self.signatures.clone();
        updated.insert(signer.clone());
        self.persist_signatures(&proposal, &updated)?;
        self.signatures = updated;

        info!(
            signer = %signer,
            signatures = self.signatures.len(),
            required = self.registry.quorum_size(),
            "[sa-03] signature approved"
        );

        self.try_promote()?;
        Ok(ControlOutcome::SignatureApproved)
    }

    /// Promote the active proposal if the quorum is reached.
    pub fn try_promote(&mut self) -> Result<Option<Promotion>, StoreError> {
        self.resume_interrupted()?;
        if !quorum_reached(&self.signatures, &self.registry) {
            return Ok(None);
        }
        let Some(proposal) = self.read_proposal()? else {
            return Ok(None);
        };

        let previous_turn = self.turn.index;
        let turn = self.turn.next();
        let staged = self.layout.staged_program();

        self.stage_program(&staged, &proposal)?;
        write_atomic(
            &self.layout.promotion_journal(),
            turn.to_string().as_bytes(),
        )?;
        if let Err(e) = Self::roll_forward(&self.layout, turn) {
            self.interrupted = true;
            error!(error = %e, turn, "[sa-03] promotion interrupted, will roll forward before the next mutation");
            return Err(e);
        }
        self.turn.index = turn;
        self.signatures.clear();

        info!(
            previous_turn,
            turn,
            bytes = proposal.len(),
            "[sa-03] proposal promoted to authoritative program"
        );

        Ok(Some(Promotion {
            previous_turn,
            turn,
            program_bytes: proposal.len(),
        }))
    }

    fn stage_program(&self, staged: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        write_synced(staged, bytes)?;
        match std::fs::metadata(self.layout.program()) {
            Ok(meta) => std::fs::set_permissions(staged, meta.permissions())
                .map_err(|e| StoreError::io(staged, e)),
            Err(_) => set_executable(staged),
        }
    }

    fn persist_signatures(&self, proposal: &[u8], set: &SignatureSet) -> Result<(), StoreError> {
        let record = SignatureRecord::new(proposal, set);
        let json = serde_json::to_vec_pretty(&record).map_err(|e| StoreError::Corrupt {
            path: self.layout.signatures(),
            reason: e.to_string(),
        })?;
        write_atomic(&self.layout.signatures(), &json)
    }
}

fn reject(operation: &str, error: VerificationError) -> ControlOutcome {
    if error.is_infrastructure() {
        warn!(operation, error = %error, "[sa-03] verification could not complete");
    } else {
        info!(operation, error = %error, "[sa-03] verification rejected");
    }
    ControlOutcome::Unauthorized(error.to_string())
}

/// Signature uploads are scratch files outside the state directory.
fn scratch_file(document: &[u8]) -> Result<tempfile::NamedTempFile, StoreError> {
    let mut file = tempfile::Builder::new()
        .prefix("sa-signature-")
        .tempfile()
        .map_err(|e| StoreError::io(std::env::temp_dir(), e))?;
    std::io::Write::write_all(&mut file, document)
        .and_then(|()| file.as_file().sync_all())
        .map_err(|e| StoreError::io(file.path(), e))?;
    Ok(file)
}

#[cfg(unix)]
fn set_executable(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .map_err(|e| StoreError::io(path, e))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}
