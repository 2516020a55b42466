//! Change detection for the weights file.
//!
//! The probe is a trait so tests can drive reloads deterministically
//! instead of sleeping on real mtimes.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Reports a modification marker for the backing weights source.
/// `None` means the source is currently missing.
pub trait ChangeProbe: Send + Sync {
    fn marker(&self) -> Option<SystemTime>;
}

/// Default probe: filesystem mtime of the weights file.
pub struct FileMtimeProbe {
    path: PathBuf,
}

impl FileMtimeProbe {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ChangeProbe for FileMtimeProbe {
    fn marker(&self) -> Option<SystemTime> {
        std::fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .ok()
    }
}
