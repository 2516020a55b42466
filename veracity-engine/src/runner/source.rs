//! Document snapshot sources.
//!
//! The document store itself is an external collaborator; the engine
//! only needs an immutable snapshot per run. The trait is the seam
//! where hosts plug in their store.

use std::path::PathBuf;

use veracity_core::errors::InputError;
use veracity_core::types::DocumentRecord;

/// Supplies the document snapshot for one analysis run.
pub trait DocumentSource: Send + Sync {
    fn snapshot(&self) -> Result<Vec<DocumentRecord>, InputError>;
}

/// Fixed in-memory snapshot. Used by run-once hosts and tests.
pub struct StaticSource {
    documents: Vec<DocumentRecord>,
}

impl StaticSource {
    pub fn new(documents: Vec<DocumentRecord>) -> Self {
        Self { documents }
    }
}

impl DocumentSource for StaticSource {
    fn snapshot(&self) -> Result<Vec<DocumentRecord>, InputError> {
        Ok(self.documents.clone())
    }
}

/// Reads a JSON array of `DocumentRecord` from a file on every
/// snapshot, so watch mode picks up upstream changes between runs.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentSource for JsonFileSource {
    fn snapshot(&self) -> Result<Vec<DocumentRecord>, InputError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            InputError::SnapshotUnreadable {
                path: self.path.display().to_string(),
                message: e.to_string(),
            }
        })?;
        serde_json::from_str(&content).map_err(|e| InputError::SnapshotUnreadable {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })
    }
}
