use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::StoreResult;
use crate::repository::Repository;

/// The scanned set of repositories under a base directory.
///
/// Built once during startup and shared immutably with request handlers.
/// The set never changes for the lifetime of a registry; [`Registry::rescan`]
/// is the explicit refresh operation and yields a fresh registry.
#[derive(Clone, Debug)]
pub struct Registry {
    root: PathBuf,
    repositories: BTreeMap<String, Repository>,
}

impl Registry {
    /// Scan the immediate subdirectories of `root` as repositories.
    ///
    /// A failure scanning one repository is logged and skipped; it never
    /// aborts discovery of the others. Hidden directories are ignored.
    pub fn scan(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        let mut repositories = BTreeMap::new();

        for entry in std::fs::read_dir(&root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            match Repository::scan(name.clone(), entry.path()) {
                Ok(repo) => {
                    tracing::debug!(repo = %name, documents = repo.documents().len(), "repository scanned");
                    repositories.insert(name, repo);
                }
                Err(err) => {
                    tracing::warn!(repo = %name, error = %err, "skipping repository: scan failed");
                }
            }
        }

        Ok(Self { root, repositories })
    }

    /// Build a fresh registry from the same base directory.
    pub fn rescan(&self) -> StoreResult<Self> {
        Self::scan(self.root.clone())
    }

    /// The base directory this registry was scanned from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All repositories, ordered by name.
    pub fn repositories(&self) -> impl Iterator<Item = &Repository> {
        self.repositories.values()
    }

    /// Repository names, ordered.
    pub fn names(&self) -> Vec<&str> {
        self.repositories.keys().map(String::as_str).collect()
    }

    /// Look up a repository by name.
    pub fn get(&self, name: &str) -> Option<&Repository> {
        self.repositories.get(name)
    }

    /// Number of repositories discovered.
    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    /// Whether the scan found no repositories.
    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }
}
