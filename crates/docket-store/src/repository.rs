use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use walkdir::WalkDir;

use crate::error::{StoreError, StoreResult};

/// A single repository: a named directory of JSON documents.
///
/// The document list is fixed at scan time. Reads and writes resolve
/// against that list, never against the live filesystem, so a path that
/// was not discovered during the scan is unreachable through this type.
#[derive(Clone, Debug)]
pub struct Repository {
    name: String,
    root: PathBuf,
    documents: Vec<String>,
}

impl Repository {
    /// Scan `root` for documents and build the repository.
    pub(crate) fn scan(name: impl Into<String>, root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        let documents = scan_documents(&root)?;
        Ok(Self {
            name: name.into(),
            root,
            documents,
        })
    }

    /// The repository's name (its directory name under the registry root).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The repository's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Relative paths of all documents, sorted.
    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    /// Whether `rel` was discovered during the scan.
    pub fn contains(&self, rel: &str) -> bool {
        self.documents.iter().any(|d| d == rel)
    }

    /// Read a document's raw bytes.
    pub fn read_document(&self, rel: &str) -> StoreResult<Vec<u8>> {
        let path = self.resolve(rel)?;
        Ok(std::fs::read(path)?)
    }

    /// Replace a document's content, all-or-nothing.
    ///
    /// The bytes land in a temporary file in the same directory first and
    /// are renamed over the target, so readers never observe a torn write
    /// even if the process dies mid-call.
    pub fn write_document(&self, rel: &str, bytes: &[u8]) -> StoreResult<()> {
        let path = self.resolve(rel)?;
        let dir = path.parent().unwrap_or(&self.root);
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }

    fn resolve(&self, rel: &str) -> StoreResult<PathBuf> {
        if !self.contains(rel) {
            return Err(StoreError::DocumentNotFound {
                repo: self.name.clone(),
                path: rel.to_string(),
            });
        }
        Ok(self.root.join(rel))
    }
}

/// Recursively collect relative paths of `.json` files under `root`.
///
/// Hidden entries (notably `.git`) are not descended into.
fn scan_documents(root: &Path) -> StoreResult<Vec<String>> {
    let mut documents = Vec::new();
    // Depth 0 is the repository root itself; its name is not subject to
    // the hidden-entry filter.
    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        entry.depth() == 0
            || !entry
                .file_name()
                .to_str()
                .map(|name| name.starts_with('.'))
                .unwrap_or(false)
    });

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        if let Ok(rel) = entry.path().strip_prefix(root) {
            documents.push(rel.to_string_lossy().into_owned());
        }
    }

    documents.sort();
    Ok(documents)
}
