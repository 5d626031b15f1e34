//! # Gateway Flow
//!
//! The HTTP surface in front of a real quorum service.

use super::fixtures::*;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use sa_05_control_gateway::build_router;
use std::sync::Arc;
use tower::ServiceExt;

const LIMIT: usize = 64 * 1024;

fn router() -> (tempfile::TempDir, Router) {
    let (dir, layout) = state_dir();
    let svc = Arc::new(open_service(players(&[("Ted", "K1"), ("Ann", "K2")]), layout));
    (dir, build_router(svc, LIMIT))
}

async fn call(router: &Router, method: &str, uri: &str, body: Vec<u8>) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

#[tokio::test]
async fn test_two_player_round_over_http() {
    let (_dir, router) = router();

    let (status, body) = call(&router, "POST", "/submit", signed("K1", b"echo v2\n")).await;
    assert_eq!((status, body.as_str()), (StatusCode::OK, "Accepted"));

    let (_, body) = call(&router, "GET", "/status", vec![]).await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["current_turn_name"], "Ted");
    assert_eq!(json["signature_count"], 1);
    assert_eq!(json["quorum_size"], 2);

    let (_, body) = call(&router, "GET", "/proposal", vec![]).await;
    assert_eq!(body, "echo v2\n");

    let (status, body) = call(&router, "POST", "/sign", signed("K2", b"echo v2\n")).await;
    assert_eq!((status, body.as_str()), (StatusCode::OK, "Signature Approved"));

    let (_, body) = call(&router, "GET", "/source", vec![]).await;
    assert_eq!(body, "echo v2\n");
    let (_, body) = call(&router, "GET", "/proposal", vec![]).await;
    assert_eq!(body, "No Active Proposal");
    let (_, body) = call(&router, "GET", "/", vec![]).await;
    assert!(body.contains("Ann"));
}

#[tokio::test]
async fn test_wrong_turn_is_forbidden() {
    let (_dir, router) = router();

    let (status, body) = call(&router, "POST", "/submit", signed("K2", b"v2")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, "Unauthorized: K2");

    let (_, body) = call(&router, "POST", "/sign", signed("K2", b"v2")).await;
    assert_eq!(body, "No Active Proposal");
}
