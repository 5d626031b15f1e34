//! Routes and handlers of the control surface.

use crate::domain::error::ApiError;
use crate::pages;
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use sa_03_proposal_quorum::{ControlOutcome, ControlSurface, StatusSnapshot, NO_ACTIVE_PROPOSAL};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Form field carrying the signed document in multipart uploads.
const UPLOAD_FIELD: &str = "upload";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub surface: Arc<dyn ControlSurface>,
}

/// Build the control-surface router.
pub fn build_router(surface: Arc<dyn ControlSurface>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/status", get(status))
        .route("/source", get(source))
        .route("/proposal", get(proposal))
        .route("/sign", get(sign_form).post(sign_raw))
        .route("/submit", get(submit_form).post(submit_raw))
        .route("/upload/sign", post(sign_upload))
        .route("/upload/submit", post(submit_upload))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { surface })
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(pages::index(&state.surface.status().await))
}

async fn status(State(state): State<AppState>) -> Json<StatusSnapshot> {
    Json(state.surface.status().await)
}

async fn source(State(state): State<AppState>) -> Result<Response, ApiError> {
    let program = state.surface.source().await?;
    Ok(text(StatusCode::OK, program))
}

async fn proposal(State(state): State<AppState>) -> Result<Response, ApiError> {
    let body = state
        .surface
        .proposal()
        .await?
        .unwrap_or_else(|| NO_ACTIVE_PROPOSAL.as_bytes().to_vec());
    Ok(text(StatusCode::OK, body))
}

async fn sign_form(State(state): State<AppState>) -> Result<Response, ApiError> {
    if state.surface.proposal().await?.is_none() {
        return Ok(Html(pages::outcome(&ControlOutcome::NoActiveProposal)).into_response());
    }
    Ok(Html(pages::sign_form()).into_response())
}

async fn submit_form() -> Html<&'static str> {
    Html(pages::submit_form())
}

async fn sign_raw(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    let outcome = state.surface.sign(&body).await?;
    Ok(text(outcome_status(&outcome), outcome.to_string()))
}

async fn submit_raw(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    let outcome = state.surface.submit(&body).await?;
    Ok(text(outcome_status(&outcome), outcome.to_string()))
}

async fn sign_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let document = read_upload(multipart).await?;
    let outcome = state.surface.sign(&document).await?;
    Ok((outcome_status(&outcome), Html(pages::outcome(&outcome))).into_response())
}

async fn submit_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let document = read_upload(multipart).await?;
    let outcome = state.surface.submit(&document).await?;
    Ok((outcome_status(&outcome), Html(pages::outcome(&outcome))).into_response())
}

async fn read_upload(mut multipart: Multipart) -> Result<Bytes, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if field.name() == Some(UPLOAD_FIELD) {
            return field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(e.to_string()));
        }
    }
    Err(ApiError::BadRequest(format!(
        "missing `{}` field",
        UPLOAD_FIELD
    )))
}

fn outcome_status(outcome: &ControlOutcome) -> StatusCode {
    match outcome {
        ControlOutcome::Unauthorized(_) => StatusCode::FORBIDDEN,
        _ => StatusCode::OK,
    }
}

fn text(status: StatusCode, body: impl Into<axum::body::Body>) -> Response {
    (status, [(header::CONTENT_TYPE, TEXT_PLAIN)], body.into()).into_response()
}
