use thiserror::Error;

/// Errors from document store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The path is not in the repository's scanned document list.
    #[error("document not found: {repo}/{path}")]
    DocumentNotFound { repo: String, path: String },

    /// A directory walk failed mid-scan.
    #[error("scan error: {0}")]
    Walk(#[from] walkdir::Error),

    /// I/O error from the underlying filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
