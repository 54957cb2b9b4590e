use std::path::{Path, PathBuf};

use git2::{ErrorCode, Repository, Signature};

use crate::error::{VcsError, VcsResult};

/// Fallback committer identity when the repository has none configured.
const FALLBACK_NAME: &str = "docket";
const FALLBACK_EMAIL: &str = "docket@localhost";

/// Token queries and commits against a single git work tree.
///
/// The repository is re-opened on every operation: the token must reflect
/// commits made by any process touching the same on-disk repository, so
/// nothing is cached between calls.
#[derive(Debug)]
pub struct GitOracle {
    workdir: PathBuf,
}

impl GitOracle {
    /// Open an oracle over an existing git work tree.
    ///
    /// Fails with [`VcsError::NotARepository`] if `workdir` is not a git
    /// repository, so misconfigured repositories surface at startup rather
    /// than on first request.
    pub fn open(workdir: impl Into<PathBuf>) -> VcsResult<Self> {
        let workdir = workdir.into();
        Repository::open(&workdir)
            .map_err(|_| VcsError::NotARepository(workdir.display().to_string()))?;
        Ok(Self { workdir })
    }

    /// The work tree this oracle operates on.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// The current version token: the HEAD commit id as hex.
    pub fn current_token(&self) -> VcsResult<String> {
        let repo = self.repo()?;
        let head = repo.head().map_err(|err| match err.code() {
            ErrorCode::UnbornBranch | ErrorCode::NotFound => VcsError::NoHistory,
            _ => VcsError::Git(err),
        })?;
        let commit = head.peel_to_commit()?;
        Ok(commit.id().to_string())
    }

    /// Stage `paths` (relative to the work tree), commit with `message`,
    /// and return the new token.
    ///
    /// The commit is created on HEAD; an unborn branch gets a root commit.
    /// Committer identity comes from git config, with a baked-in fallback
    /// for repositories that have none.
    pub fn commit_paths(&self, paths: &[&Path], message: &str) -> VcsResult<String> {
        let repo = self.repo()?;

        let mut index = repo.index().map_err(VcsError::Commit)?;
        for path in paths {
            index.add_path(path).map_err(VcsError::Commit)?;
        }
        index.write().map_err(VcsError::Commit)?;
        let tree_id = index.write_tree().map_err(VcsError::Commit)?;
        let tree = repo.find_tree(tree_id).map_err(VcsError::Commit)?;

        let signature = repo
            .signature()
            .or_else(|_| Signature::now(FALLBACK_NAME, FALLBACK_EMAIL))
            .map_err(VcsError::Commit)?;

        let parents = match repo.head() {
            Ok(head) => vec![head.peel_to_commit().map_err(VcsError::Commit)?],
            Err(err) if matches!(err.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                Vec::new()
            }
            Err(err) => return Err(VcsError::Commit(err)),
        };
        let parent_refs: Vec<&git2::Commit<'_>> = parents.iter().collect();

        let oid = repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parent_refs)
            .map_err(VcsError::Commit)?;

        tracing::debug!(workdir = %self.workdir.display(), commit = %oid, "commit created");
        Ok(oid.to_string())
    }

    fn repo(&self) -> VcsResult<Repository> {
        Ok(Repository::open(&self.workdir)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_workdir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "tester").unwrap();
        config.set_str("user.email", "tester@example.com").unwrap();
        dir
    }

    fn write_and_commit(oracle: &GitOracle, rel: &str, content: &str, message: &str) -> String {
        std::fs::write(oracle.workdir().join(rel), content).unwrap();
        oracle.commit_paths(&[Path::new(rel)], message).unwrap()
    }

    #[test]
    fn open_rejects_plain_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = GitOracle::open(dir.path()).unwrap_err();
        assert!(matches!(err, VcsError::NotARepository(_)));
    }

    #[test]
    fn unborn_repository_has_no_token() {
        let dir = init_workdir();
        let oracle = GitOracle::open(dir.path()).unwrap();
        let err = oracle.current_token().unwrap_err();
        assert!(matches!(err, VcsError::NoHistory));
    }

    #[test]
    fn commit_on_unborn_branch_creates_root() {
        let dir = init_workdir();
        let oracle = GitOracle::open(dir.path()).unwrap();
        let token = write_and_commit(&oracle, "a.json", "{}", "initial");
        assert_eq!(oracle.current_token().unwrap(), token);
    }

    #[test]
    fn token_is_stable_between_commits() {
        let dir = init_workdir();
        let oracle = GitOracle::open(dir.path()).unwrap();
        write_and_commit(&oracle, "a.json", "{}", "initial");
        assert_eq!(
            oracle.current_token().unwrap(),
            oracle.current_token().unwrap()
        );
    }

    #[test]
    fn commit_advances_token() {
        let dir = init_workdir();
        let oracle = GitOracle::open(dir.path()).unwrap();
        let first = write_and_commit(&oracle, "a.json", "{}", "initial");
        let second = write_and_commit(&oracle, "a.json", r#"{"k":1}"#, "edit");
        assert_ne!(first, second);
        assert_eq!(oracle.current_token().unwrap(), second);
    }

    #[test]
    fn external_commits_are_visible() {
        let dir = init_workdir();
        let oracle = GitOracle::open(dir.path()).unwrap();
        write_and_commit(&oracle, "a.json", "{}", "initial");
        let before = oracle.current_token().unwrap();

        // A second oracle stands in for another process on the same repo.
        let external = GitOracle::open(dir.path()).unwrap();
        let committed = write_and_commit(&external, "a.json", "[1]", "external edit");

        assert_ne!(oracle.current_token().unwrap(), before);
        assert_eq!(oracle.current_token().unwrap(), committed);
    }

    #[test]
    fn commit_message_is_recorded() {
        let dir = init_workdir();
        let oracle = GitOracle::open(dir.path()).unwrap();
        let token = write_and_commit(&oracle, "a.json", "{}", "the message");

        let repo = Repository::open(dir.path()).unwrap();
        let commit = repo
            .find_commit(git2::Oid::from_str(&token).unwrap())
            .unwrap();
        assert_eq!(commit.message(), Some("the message"));
    }
}
