//! Concurrency controller for Docket.
//!
//! Orchestrates the optimistic-concurrency write cycle: read the current
//! token, compare it to the client's expected token, apply the patch,
//! persist, commit. The check-through-commit sequence for a repository
//! runs under that repository's lock, so no concurrent writer can land a
//! commit between another writer's token check and its commit.
//!
//! # Key Types
//!
//! - [`Coordinator`] -- the façade request handlers talk to
//! - [`WriteRequest`] / [`WriteOutcome`] -- one conditional write
//! - [`EngineError`] -- the full failure taxonomy, with token mismatch
//!   ([`EngineError::Conflict`]) kept distinct from an inapplicable patch
//!   ([`EngineError::PatchFailed`])

pub mod coordinator;
pub mod error;

pub use coordinator::{Coordinator, WriteOutcome, WriteRequest};
pub use error::{EngineError, EngineResult};
