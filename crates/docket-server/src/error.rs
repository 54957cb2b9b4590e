use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

use docket_engine::EngineError;

/// Server lifecycle errors (startup, config, bind).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("store error: {0}")]
    Store(#[from] docket_store::StoreError),

    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Result alias for server lifecycle operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Request-boundary errors, each mapping to one HTTP status.
///
/// [`ApiError::Conflict`] (412, recoverable by retry with a fresh read)
/// and [`ApiError::PatchRejected`] (422, a client-side bug) are kept
/// distinct on purpose: the first is the protocol working as designed,
/// the second is a contract violation.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not found")]
    NotFound,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("precondition failed: current token is {current}")]
    Conflict { current: String },

    #[error("patch rejected: {0}")]
    PatchRejected(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::NotFound { .. } => ApiError::NotFound,
            EngineError::Conflict { current } => ApiError::Conflict { current },
            EngineError::PatchFailed(source) => ApiError::PatchRejected(source.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => {
                (StatusCode::NOT_FOUND, Json(json!({"status": "not found"}))).into_response()
            }
            ApiError::BadRequest(reason) => (
                StatusCode::BAD_REQUEST,
                Json(json!({"status": "bad request", "reason": reason})),
            )
                .into_response(),
            ApiError::Conflict { current } => (
                StatusCode::PRECONDITION_FAILED,
                Json(json!({"status": "precondition failed", "token": current})),
            )
                .into_response(),
            ApiError::PatchRejected(reason) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({"status": "patch rejected", "reason": reason})),
            )
                .into_response(),
            ApiError::Internal(reason) => {
                tracing::error!(error = %reason, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"status": "error"})),
                )
                    .into_response()
            }
        }
    }
}
