//! HTTP server for Docket.
//!
//! Serves version-controlled JSON documents with optimistic concurrency:
//! reads carry the repository's current token as `ETag`, writes are JSON
//! Patches accepted only when the `If-Match` token still matches, and
//! every accepted write is a commit.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ApiError, ServerError, ServerResult};
pub use server::DocketServer;
