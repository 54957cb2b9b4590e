//! Version oracle for Docket.
//!
//! The single doorway to git. A repository's version token is its HEAD
//! commit id; advancing the token is a commit. All operations go through
//! the `git2` crate (no shelling out), and no other crate imports `git2`
//! directly.
//!
//! # Key Types
//!
//! - [`GitOracle`] -- token queries and commits against one work tree

pub mod error;
pub mod oracle;

pub use error::{VcsError, VcsResult};
pub use oracle::GitOracle;
