//! JSON-file-backed seen-set for event deduplication.
//!
//! Stores already-notified event ids as a JSON array of strings. The store
//! degrades instead of failing: an unreadable or corrupt file opens as an
//! empty set, and a failed write is logged without interrupting the caller,
//! so a persistence problem downgrades to "event not seen" rather than
//! stopping the poll loop. Ids are never pruned; the file grows for the
//! lifetime of the deployment.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from the store's load/persist internals.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("corrupt seen-set file {path}: {source}")]
    Serde {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Durable set of event ids that have already been notified.
pub struct SeenStore {
    path: PathBuf,
    ids: HashSet<String>,
}

impl SeenStore {
    /// Opens the store at `path`, reading any existing id set.
    ///
    /// Never fails: a missing file yields an empty set, and an unreadable
    /// or corrupt file yields an empty set with a warning.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let ids = match load_ids(&path) {
            Ok(ids) => ids,
            Err(StoreError::Io { ref source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                HashSet::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not read seen-set; starting empty");
                HashSet::new()
            }
        };
        Self { path, ids }
    }

    /// Whether `id` has already been notified.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Records `id` and persists the set.
    ///
    /// A write failure is logged as a warning; the id stays in the
    /// in-memory set for the rest of the process lifetime either way.
    pub fn insert(&mut self, id: impl Into<String>) {
        self.ids.insert(id.into());
        if let Err(e) = self.persist() {
            tracing::warn!(error = %e, "could not persist seen-set");
        }
    }

    /// Number of ids recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Writes the set as a sorted JSON array, so the file diffs cleanly
    /// between runs.
    fn persist(&self) -> Result<(), StoreError> {
        let mut ids: Vec<&str> = self.ids.iter().map(String::as_str).collect();
        ids.sort_unstable();
        let content = serde_json::to_string(&ids).map_err(|source| StoreError::Serde {
            path: self.path.display().to_string(),
            source,
        })?;
        fs::write(&self.path, content).map_err(|source| StoreError::Io {
            path: self.path.display().to_string(),
            source,
        })
    }
}

fn load_ids(path: &Path) -> Result<HashSet<String>, StoreError> {
    let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let ids: Vec<String> = serde_json::from_str(&content).map_err(|source| StoreError::Serde {
        path: path.display().to_string(),
        source,
    })?;
    Ok(ids.into_iter().collect())
}
