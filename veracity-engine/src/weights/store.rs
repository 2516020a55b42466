//! Single source of truth for scoring weights.
//!
//! Readers take a cheap `Arc` clone of the current snapshot; reload
//! swaps the whole snapshot behind a write lock, so a reader never
//! observes a half-updated config. An invalid incoming config is
//! rejected whole and the prior snapshot keeps serving.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use veracity_core::config::RuleWeightsConfig;
use veracity_core::errors::ConfigError;

use super::probe::ChangeProbe;

/// Immutable, fully validated weights snapshot.
#[derive(Debug, Clone)]
pub struct WeightsSnapshot {
    pub config: RuleWeightsConfig,
    /// True when compiled defaults are serving because the file was
    /// missing or invalid at startup.
    pub degraded: bool,
    pub loaded_at: DateTime<Utc>,
}

impl WeightsSnapshot {
    fn new(config: RuleWeightsConfig, degraded: bool) -> Self {
        Self {
            config,
            degraded,
            loaded_at: Utc::now(),
        }
    }
}

/// Outcome of one reload attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// No change detected since the last poll.
    Unchanged,
    /// A new snapshot was validated and swapped in.
    Reloaded { version: String },
    /// The incoming config was rejected; the prior snapshot serves on.
    Rejected { reason: String },
}

/// Concurrent-safe weights store with polled hot reload.
pub struct WeightsStore {
    path: PathBuf,
    current: RwLock<Arc<WeightsSnapshot>>,
    last_marker: Mutex<Option<SystemTime>>,
}

impl WeightsStore {
    /// Load the initial snapshot. A missing file serves compiled
    /// defaults with a warning; a malformed or invalid file serves
    /// defaults with an error logged. Neither is fatal.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let snapshot = match RuleWeightsConfig::load(&path) {
            Ok(config) => {
                tracing::info!(version = %config.version, path = %path.display(), "loaded weights file");
                WeightsSnapshot::new(config, false)
            }
            Err(ConfigError::FileNotFound { .. }) => {
                tracing::warn!(path = %path.display(), "weights file missing, using builtin defaults");
                WeightsSnapshot::new(RuleWeightsConfig::builtin_defaults(), true)
            }
            Err(err) => {
                tracing::error!(path = %path.display(), %err, "invalid weights file, using builtin defaults");
                WeightsSnapshot::new(RuleWeightsConfig::builtin_defaults(), true)
            }
        };

        // Seed the marker so the first poll does not treat the file
        // just loaded as a change.
        let marker = std::fs::metadata(&path).and_then(|m| m.modified()).ok();
        Self {
            path,
            current: RwLock::new(Arc::new(snapshot)),
            last_marker: Mutex::new(marker),
        }
    }

    /// Build a store around an already-resolved config (no backing
    /// file). Used when the operator supplies weights inline and in
    /// tests.
    pub fn from_config(config: RuleWeightsConfig) -> Self {
        Self {
            path: PathBuf::new(),
            current: RwLock::new(Arc::new(WeightsSnapshot::new(config, false))),
            last_marker: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current snapshot. Non-blocking in practice: the write lock is
    /// held only for the pointer swap during reload.
    pub fn snapshot(&self) -> Arc<WeightsSnapshot> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// True when the store is serving compiled defaults.
    pub fn is_degraded(&self) -> bool {
        self.snapshot().degraded
    }

    /// Attempt a reload from the backing file. Any failure, including
    /// the file having disappeared, retains the prior snapshot.
    pub fn reload(&self) -> ReloadOutcome {
        match RuleWeightsConfig::load(&self.path) {
            Ok(config) => {
                let version = config.version.clone();
                let snapshot = Arc::new(WeightsSnapshot::new(config, false));
                let mut guard = self
                    .current
                    .write()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                *guard = snapshot;
                tracing::info!(%version, "weights snapshot swapped");
                ReloadOutcome::Reloaded { version }
            }
            Err(err) => {
                tracing::warn!(%err, "weights reload rejected, retaining prior snapshot");
                ReloadOutcome::Rejected {
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Poll the change probe; reload only when the modification
    /// marker moved since the previous poll.
    pub fn poll(&self, probe: &dyn ChangeProbe) -> ReloadOutcome {
        let marker = probe.marker();
        let mut last = self
            .last_marker
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        match (marker, *last) {
            (None, _) => {
                // Source missing: keep serving, surface as a warning
                // only if we previously had a marker.
                if last.take().is_some() {
                    tracing::warn!(path = %self.path.display(), "weights file disappeared, retaining prior snapshot");
                    return ReloadOutcome::Rejected {
                        reason: "weights file disappeared".to_string(),
                    };
                }
                ReloadOutcome::Unchanged
            }
            (Some(m), Some(prev)) if m == prev => ReloadOutcome::Unchanged,
            (Some(m), _) => {
                *last = Some(m);
                drop(last);
                self.reload()
            }
        }
    }
}
