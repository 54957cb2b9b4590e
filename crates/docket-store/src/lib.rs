//! Document store for Docket.
//!
//! Discovers repositories and their JSON documents once at startup and
//! provides raw reads and atomic writes. Only paths recorded during the
//! scan are ever servable, so traversal segments in a request path can
//! never escape a repository root.
//!
//! # Key Types
//!
//! - [`Registry`] -- the scanned set of repositories
//! - [`Repository`] -- one repository root and its document list

pub mod error;
pub mod registry;
pub mod repository;

pub use error::{StoreError, StoreResult};
pub use registry::Registry;
pub use repository::Repository;
