use std::sync::Arc;

use axum::http::header;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use docket_engine::Coordinator;

use crate::handler;

/// Build the axum router over a shared coordinator.
///
/// `ETag` is exposed through CORS: the browser client reads it to track
/// the token across edits.
pub fn build_router(coordinator: Arc<Coordinator>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([header::ETAG]);

    Router::new()
        .route("/repositories", get(handler::list_repositories))
        .route("/repositories/:repo/documents", get(handler::list_documents))
        .route(
            "/repositories/:repo/documents/*path",
            get(handler::get_document).patch(handler::patch_document),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(coordinator)
}
