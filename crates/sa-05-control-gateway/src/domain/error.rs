//! Gateway error types.
//!
//! Verification failures are not errors at this layer; they arrive as
//! `ControlOutcome::Unauthorized` values. `ApiError` only covers requests
//! the gateway itself cannot serve.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sa_03_proposal_quorum::StoreError;
use thiserror::Error;
use tracing::error;

/// Error turned into an HTTP response.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The state directory could not be read or written.
    #[error("state unavailable: {0}")]
    Store(#[from] StoreError),

    /// The request was malformed (e.g. multipart without an upload field).
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "[sa-05] request failed");
        }
        (status, self.to_string()).into_response()
    }
}

/// Gateway lifecycle errors
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Server socket bind error
    #[error("server bind error on {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The server stopped with an I/O error
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
