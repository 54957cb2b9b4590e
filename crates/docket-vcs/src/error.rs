use thiserror::Error;

/// Errors from version-control operations.
#[derive(Debug, Error)]
pub enum VcsError {
    /// The directory is not a git repository.
    #[error("not a git repository: {0}")]
    NotARepository(String),

    /// The repository has no commits, so no token exists yet.
    #[error("repository has no commits")]
    NoHistory,

    /// Creating a commit failed. Callers must not advance any cached
    /// state on this path.
    #[error("commit failed: {0}")]
    Commit(#[source] git2::Error),

    /// Any other libgit2 failure.
    #[error("git error: {0}")]
    Git(#[from] git2::Error),
}

/// Result alias for version-control operations.
pub type VcsResult<T> = Result<T, VcsError>;
