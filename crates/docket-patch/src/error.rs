use thiserror::Error;

/// Errors from patch operations.
#[derive(Debug, Error)]
pub enum PatchError {
    /// An operation's precondition failed against the baseline document
    /// (e.g. a `remove` at a missing path, a `test` value mismatch).
    #[error("patch does not apply: {0}")]
    Apply(#[from] json_patch::PatchError),

    /// The supplied value is not a valid RFC 6902 operation list.
    #[error("malformed patch: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result alias for patch operations.
pub type PatchResult<T> = Result<T, PatchError>;
