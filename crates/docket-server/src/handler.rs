use std::sync::Arc;

use axum::extract::{Path as UrlPath, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use serde_json::{json, Value};

use docket_engine::{Coordinator, EngineResult, WriteRequest};

use crate::error::ApiError;

pub(crate) type SharedCoordinator = Arc<Coordinator>;

/// `GET /repositories`
pub async fn list_repositories(
    State(coordinator): State<SharedCoordinator>,
) -> Json<Vec<String>> {
    Json(
        coordinator
            .repositories()
            .into_iter()
            .map(String::from)
            .collect(),
    )
}

/// `GET /repositories/:repo/documents`
pub async fn list_documents(
    State(coordinator): State<SharedCoordinator>,
    UrlPath(repo): UrlPath<String>,
) -> Result<Json<Vec<String>>, ApiError> {
    let documents = coordinator.documents(&repo).ok_or(ApiError::NotFound)?;
    Ok(Json(documents.to_vec()))
}

/// `GET /repositories/:repo/documents/*path`
///
/// The body is the document's raw bytes; the `ETag` header carries the
/// repository's current token.
pub async fn get_document(
    State(coordinator): State<SharedCoordinator>,
    UrlPath((repo, path)): UrlPath<(String, String)>,
) -> Result<Response, ApiError> {
    let (bytes, token) =
        run_blocking(move || coordinator.read_document(&repo, &path)).await?;

    let mut response = (StatusCode::OK, bytes).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response.headers_mut().insert(header::ETAG, token_header(&token)?);
    Ok(response)
}

/// `PATCH /repositories/:repo/documents/*path` body.
#[derive(Debug, Deserialize)]
pub struct PatchRequest {
    #[serde(default)]
    pub patch: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `PATCH /repositories/:repo/documents/*path`
///
/// Requires an `If-Match` header with the token the baseline was read
/// under, plus a patch and a commit message in the body. Accepted writes
/// return the new token both in the body and as `ETag`.
pub async fn patch_document(
    State(coordinator): State<SharedCoordinator>,
    UrlPath((repo, path)): UrlPath<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<PatchRequest>,
) -> Result<Response, ApiError> {
    let expected_token = headers
        .get(header::IF_MATCH)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .ok_or_else(|| ApiError::BadRequest("If-Match header required".into()))?;
    let message = body
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("commit message required".into()))?;
    let raw_patch = body
        .patch
        .ok_or_else(|| ApiError::BadRequest("patch required".into()))?;
    let patch = docket_patch::parse(&raw_patch)
        .map_err(|err| ApiError::BadRequest(err.to_string()))?;

    let request = WriteRequest {
        expected_token,
        patch,
        message,
    };
    let outcome =
        run_blocking(move || coordinator.write_document(&repo, &path, request)).await?;

    let etag = token_header(&outcome.token)?;
    let mut response = Json(json!({
        "status": "success",
        "token": outcome.token,
    }))
    .into_response();
    response.headers_mut().insert(header::ETAG, etag);
    Ok(response)
}

/// Run a synchronous engine operation on the blocking thread pool.
async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> EngineResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))?
        .map_err(ApiError::from)
}

fn token_header(token: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(token).map_err(|err| ApiError::Internal(err.to_string()))
}
