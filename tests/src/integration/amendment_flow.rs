//! # Amendment Flow
//!
//! Full rounds through `QuorumService` with the real verification service,
//! including restarts between requests.

use super::fixtures::*;
use sa_03_proposal_quorum::{ControlOutcome, ControlSurface, GameState};

#[tokio::test]
async fn test_single_player_promotes_on_submit() {
    let (_dir, layout) = state_dir();
    let svc = open_service(players(&[("Ted", "K1")]), layout);

    let outcome = svc.submit(&signed("K1", b"v2")).await.unwrap();

    assert_eq!(outcome, ControlOutcome::Accepted);
    assert_eq!(svc.source().await.unwrap(), b"v2");
    assert_eq!(svc.proposal().await.unwrap(), None);
    let status = svc.status().await;
    assert_eq!(status.current_turn_name, "Ted");
    assert_eq!(status.signature_count_label(), "none");
    assert!(status.signer_names.is_empty());
}

#[tokio::test]
async fn test_three_player_round_rotates_turn() {
    let (_dir, layout) = state_dir();
    let svc = open_service(three_players(), layout);

    svc.submit(&signed("K1", b"v2")).await.unwrap();
    assert_eq!(
        svc.sign(&signed("K3", b"v2")).await.unwrap(),
        ControlOutcome::SignatureApproved
    );
    let status = svc.status().await;
    assert_eq!(status.signature_count, Some(2));
    assert_eq!(status.signer_names, vec!["Ted", "Bob"]);
    assert_eq!(svc.source().await.unwrap(), ORIGINAL);

    svc.sign(&signed("K2", b"v2")).await.unwrap();
    assert_eq!(svc.source().await.unwrap(), b"v2");
    assert_eq!(svc.status().await.current_turn_name, "Ann");

    // Ted's turn is over.
    let late = svc.submit(&signed("K1", b"v3")).await.unwrap();
    assert_eq!(late, ControlOutcome::Unauthorized("K1".into()));
    assert_eq!(svc.proposal().await.unwrap(), None);
}

#[tokio::test]
async fn test_rejections_leave_state_untouched() {
    let (_dir, layout) = state_dir();
    let svc = open_service(three_players(), layout);

    assert_eq!(
        svc.sign(&signed("K2", b"v2")).await.unwrap(),
        ControlOutcome::NoActiveProposal
    );

    svc.submit(&signed("K1", b"v2")).await.unwrap();
    let before = svc.status().await;

    let outcomes = [
        svc.submit(&signed("K2", b"v9")).await.unwrap(),
        svc.sign(b"not a signed document").await.unwrap(),
        svc.sign(&signed("K7", b"v2")).await.unwrap(),
        svc.sign(&signed("K2", b"something else")).await.unwrap(),
    ];
    for outcome in &outcomes {
        assert!(
            matches!(outcome, ControlOutcome::Unauthorized(_)),
            "{:?}",
            outcome
        );
    }

    assert_eq!(svc.status().await, before);
    assert_eq!(svc.proposal().await.unwrap(), Some(b"v2".to_vec()));
    assert_eq!(svc.source().await.unwrap(), ORIGINAL);
}

#[tokio::test]
async fn test_resubmission_discards_endorsements() {
    let (_dir, layout) = state_dir();
    let svc = open_service(three_players(), layout);

    svc.submit(&signed("K1", b"v2")).await.unwrap();
    svc.sign(&signed("K2", b"v2")).await.unwrap();
    svc.submit(&signed("K1", b"v2-fixed")).await.unwrap();

    let status = svc.status().await;
    assert_eq!(status.signature_count, Some(1));
    assert_eq!(status.signer_names, vec!["Ted"]);

    // An endorsement of the superseded content no longer counts.
    let stale = svc.sign(&signed("K2", b"v2")).await.unwrap();
    assert!(matches!(stale, ControlOutcome::Unauthorized(_)));
}

#[tokio::test]
async fn test_endorsements_survive_restart() {
    let (_dir, layout) = state_dir();
    let svc = open_service(three_players(), layout.clone());
    svc.submit(&signed("K1", b"v2")).await.unwrap();
    svc.sign(&signed("K2", b"v2")).await.unwrap();
    drop(svc);

    let svc = open_service(three_players(), layout);
    assert_eq!(svc.status().await.signature_count, Some(2));
    svc.sign(&signed("K3", b"v2")).await.unwrap();
    assert_eq!(svc.source().await.unwrap(), b"v2");
    assert_eq!(svc.status().await.current_turn_name, "Ann");
}

#[tokio::test]
async fn test_interrupted_promotion_completes_on_restart() {
    let (_dir, layout) = state_dir();
    let svc = open_service(three_players(), layout.clone());
    svc.submit(&signed("K1", b"v2")).await.unwrap();
    svc.sign(&signed("K2", b"v2")).await.unwrap();
    drop(svc);

    // Killed after the journal was written, before the program was replaced.
    std::fs::write(layout.staged_program(), b"v2").unwrap();
    std::fs::write(layout.promotion_journal(), b"1").unwrap();

    let svc = open_service(three_players(), layout.clone());
    assert_eq!(svc.source().await.unwrap(), b"v2");
    assert_eq!(svc.status().await.current_turn_name, "Ann");
    assert!(!layout.promotion_journal().exists());
    assert!(!layout.staged_program().exists());
}

#[tokio::test]
async fn test_concurrent_signers_promote_once() {
    let (_dir, layout) = state_dir();
    let svc = std::sync::Arc::new(open_service(three_players(), layout));
    svc.submit(&signed("K1", b"v2")).await.unwrap();

    let handles: Vec<_> = ["K2", "K3", "K2", "K3"]
        .into_iter()
        .map(|id| {
            let svc = svc.clone();
            tokio::spawn(async move { svc.sign(&signed(id, b"v2")).await.unwrap() })
        })
        .collect();
    for handle in handles {
        let outcome = handle.await.unwrap();
        // Signatures arriving after promotion find no proposal.
        assert!(
            outcome == ControlOutcome::SignatureApproved
                || outcome == ControlOutcome::NoActiveProposal
        );
    }

    let state = svc.state().await;
    assert_eq!(state.turn_index(), 1);
    assert!(!state.has_proposal());
    assert!(state.signatures().is_empty());
}

#[test]
fn test_recover_is_idempotent() {
    let (_dir, layout) = state_dir();
    GameState::recover(&layout, 3).unwrap();
    GameState::recover(&layout, 3).unwrap();
    assert_eq!(std::fs::read(layout.program()).unwrap(), ORIGINAL);
}
