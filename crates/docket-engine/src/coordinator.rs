use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use serde_json::Value;

use docket_patch::Patch;
use docket_store::{Registry, Repository};
use docket_vcs::GitOracle;

use crate::error::{EngineError, EngineResult};

/// One conditional write: a patch, a commit message, and the token the
/// client read the baseline under.
#[derive(Debug)]
pub struct WriteRequest {
    pub expected_token: String,
    pub patch: Patch,
    pub message: String,
}

/// A successful write. Carries the new token so the client can keep
/// editing against a fresh baseline without re-fetching.
#[derive(Clone, Debug)]
pub struct WriteOutcome {
    pub token: String,
}

/// Per-repository state: the oracle plus the lock serializing writes.
struct RepoHandle {
    oracle: GitOracle,
    write_lock: Mutex<()>,
}

/// The façade request handlers talk to.
///
/// Holds the scanned registry and one [`RepoHandle`] per repository that
/// is actually a git work tree. Subdirectories without git history are
/// logged and dropped from the served set, the same skip-don't-abort
/// policy the registry applies to unscannable directories.
///
/// All operations are synchronous; the HTTP layer runs them on the
/// blocking thread pool.
pub struct Coordinator {
    registry: Registry,
    repos: BTreeMap<String, RepoHandle>,
}

impl Coordinator {
    pub fn new(registry: Registry) -> Self {
        let mut repos = BTreeMap::new();
        for repo in registry.repositories() {
            match GitOracle::open(repo.root()) {
                Ok(oracle) => {
                    repos.insert(
                        repo.name().to_string(),
                        RepoHandle {
                            oracle,
                            write_lock: Mutex::new(()),
                        },
                    );
                }
                Err(err) => {
                    tracing::warn!(repo = %repo.name(), error = %err, "skipping repository: not a git work tree");
                }
            }
        }
        Self { registry, repos }
    }

    /// Names of the served repositories, ordered.
    pub fn repositories(&self) -> Vec<&str> {
        self.repos.keys().map(String::as_str).collect()
    }

    /// Relative document paths for `repo`, or `None` if unknown.
    pub fn documents(&self, repo: &str) -> Option<&[String]> {
        self.repos.get(repo)?;
        self.registry.get(repo).map(Repository::documents)
    }

    /// Rebuild the coordinator from a fresh scan of the same base
    /// directory. The explicit refresh operation; nothing calls it
    /// implicitly.
    pub fn rescan(&self) -> EngineResult<Self> {
        Ok(Self::new(self.registry.rescan()?))
    }

    /// Read a document's raw bytes together with the repository's current
    /// token.
    ///
    /// The token is read before the content: a commit racing this read
    /// then yields a stale token (a recoverable conflict on the next
    /// write) rather than a fresh token over stale content, which would
    /// make a correct client's patch misapply.
    pub fn read_document(&self, repo: &str, path: &str) -> EngineResult<(Vec<u8>, String)> {
        let (repository, handle) = self.resolve(repo, path)?;
        let token = handle.oracle.current_token()?;
        let bytes = repository.read_document(path)?;
        Ok((bytes, token))
    }

    /// The repository's current token, re-queried from history.
    pub fn current_token(&self, repo: &str) -> EngineResult<String> {
        let handle = self.repos.get(repo).ok_or_else(|| EngineError::NotFound {
            repo: repo.to_string(),
            path: String::new(),
        })?;
        Ok(handle.oracle.current_token()?)
    }

    /// Run one conditional write: token check, patch apply, persist,
    /// commit.
    ///
    /// The whole sequence holds the repository's write lock, so a
    /// concurrent writer can neither invalidate the token after it was
    /// checked nor land its own commit in between. The token comparison
    /// is the single source of truth: content-identical writes under a
    /// stale token are still rejected, and every accepted write consumes
    /// exactly one token.
    pub fn write_document(
        &self,
        repo: &str,
        path: &str,
        request: WriteRequest,
    ) -> EngineResult<WriteOutcome> {
        let (repository, handle) = self.resolve(repo, path)?;
        let _guard = handle
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let current = handle.oracle.current_token()?;
        if request.expected_token != current {
            tracing::debug!(repo, path, "write rejected: token mismatch");
            return Err(EngineError::Conflict { current });
        }

        let bytes = repository.read_document(path)?;
        let before: Value =
            serde_json::from_slice(&bytes).map_err(|source| EngineError::Malformed {
                repo: repo.to_string(),
                path: path.to_string(),
                source,
            })?;

        let after = docket_patch::apply(&before, &request.patch)?;

        let mut out = serde_json::to_vec_pretty(&after)
            .map_err(|err| EngineError::Serialization(err.to_string()))?;
        out.push(b'\n');

        // Past this point a failure leaves the work tree ahead of history.
        // That state is surfaced, never rolled back here.
        repository.write_document(path, &out)?;
        let token = handle
            .oracle
            .commit_paths(&[Path::new(path)], &request.message)?;

        tracing::info!(repo, path, token = %token, "document committed");
        Ok(WriteOutcome { token })
    }

    fn resolve(&self, repo: &str, path: &str) -> EngineResult<(&Repository, &RepoHandle)> {
        let not_found = || EngineError::NotFound {
            repo: repo.to_string(),
            path: path.to_string(),
        };
        let handle = self.repos.get(repo).ok_or_else(not_found)?;
        let repository = self.registry.get(repo).ok_or_else(not_found)?;
        if !repository.contains(path) {
            return Err(not_found());
        }
        Ok((repository, handle))
    }
}
