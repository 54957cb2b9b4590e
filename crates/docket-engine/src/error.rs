use thiserror::Error;

/// Errors from the write cycle and reads that feed it.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Unknown repository or document. Documents are never created
    /// implicitly.
    #[error("not found: {repo}/{path}")]
    NotFound { repo: String, path: String },

    /// The expected token does not match the repository's current token.
    /// Recoverable: the client re-reads and retries. Carries the current
    /// token so the client can rebase without another round trip.
    #[error("token mismatch: current token is {current}")]
    Conflict { current: String },

    /// The token matched but the patch does not apply to the current
    /// content. Signals a client-side bug or corrupted baseline, not a
    /// concurrency issue.
    #[error("patch rejected: {0}")]
    PatchFailed(#[from] docket_patch::PatchError),

    /// The stored document is not valid JSON.
    #[error("document {repo}/{path} is not valid JSON: {source}")]
    Malformed {
        repo: String,
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Serialization of the patched document failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Filesystem failure in the document store.
    #[error("store error: {0}")]
    Store(#[from] docket_store::StoreError),

    /// Version-control failure (token query or commit).
    #[error("version control error: {0}")]
    Vcs(#[from] docket_vcs::VcsError),
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
