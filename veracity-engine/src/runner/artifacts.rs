//! Versioned output artifacts for the reporting boundary.
//!
//! Four JSON artifacts per completed run, each replaced atomically
//! (tmp + rename) so readers of the previous file never observe a
//! partial write.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use veracity_core::errors::RunError;
use veracity_core::types::AnalysisRun;

pub const CONTRADICTIONS_FILE: &str = "contradictions.json";
pub const SCORED_FILE: &str = "contradictions_scored.json";
pub const RUN_FILE: &str = "analysis_run.json";
pub const STATUS_FILE: &str = "status.json";

/// Run metadata artifact, without the full pattern payloads.
#[derive(Debug, Serialize)]
struct RunMetadata<'a> {
    run_id: &'a str,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    status: veracity_core::types::RunStatus,
    risk_level: veracity_core::types::RiskLevel,
    confidence_score: u8,
    weights_version: &'a str,
    document_count: usize,
    total_document_versions: u64,
    pattern_count: usize,
    notes: &'a [String],
}

#[derive(Debug, Serialize)]
struct ArtifactStatus {
    present: bool,
    updated_at: Option<DateTime<Utc>>,
}

/// Status summary artifact: presence and freshness of each artifact,
/// plus the weights provenance of the run that produced them.
#[derive(Debug, Serialize)]
struct StatusSummary<'a> {
    generated_at: DateTime<Utc>,
    run_id: &'a str,
    weights_version: &'a str,
    degraded_weights: bool,
    artifacts: BTreeMap<&'static str, ArtifactStatus>,
}

/// Writes run artifacts into one output directory.
pub struct ArtifactWriter {
    dir: PathBuf,
}

impl ArtifactWriter {
    /// Create the writer, ensuring the output directory exists.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, RunError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| RunError::ArtifactWrite {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist all four artifacts for a completed run.
    pub fn write_run(&self, run: &AnalysisRun, degraded_weights: bool) -> Result<(), RunError> {
        self.write_json(CONTRADICTIONS_FILE, &run.patterns)?;
        self.write_json(SCORED_FILE, &run.scored)?;
        self.write_json(
            RUN_FILE,
            &RunMetadata {
                run_id: &run.run_id,
                started_at: run.started_at,
                finished_at: run.finished_at,
                status: run.status,
                risk_level: run.risk_level,
                confidence_score: run.confidence_score,
                weights_version: &run.weights_version,
                document_count: run.document_count,
                total_document_versions: run.total_document_versions,
                pattern_count: run.patterns.len(),
                notes: &run.notes,
            },
        )?;

        let artifacts = [CONTRADICTIONS_FILE, SCORED_FILE, RUN_FILE]
            .into_iter()
            .map(|name| (name, self.stat(name)))
            .collect();
        self.write_json(
            STATUS_FILE,
            &StatusSummary {
                generated_at: Utc::now(),
                run_id: &run.run_id,
                weights_version: &run.weights_version,
                degraded_weights,
                artifacts,
            },
        )
    }

    fn stat(&self, name: &str) -> ArtifactStatus {
        let path = self.dir.join(name);
        match std::fs::metadata(&path).and_then(|m| m.modified()) {
            Ok(mtime) => ArtifactStatus {
                present: true,
                updated_at: Some(DateTime::<Utc>::from(mtime)),
            },
            Err(_) => ArtifactStatus {
                present: false,
                updated_at: None,
            },
        }
    }

    /// Serialize pretty JSON and swap it in atomically.
    fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<(), RunError> {
        let path = self.dir.join(name);
        let err = |message: String| RunError::ArtifactWrite {
            path: path.display().to_string(),
            message,
        };

        let json = serde_json::to_vec_pretty(value).map_err(|e| err(e.to_string()))?;
        let tmp = self.dir.join(format!("{name}.tmp"));
        std::fs::write(&tmp, &json).map_err(|e| err(e.to_string()))?;
        std::fs::rename(&tmp, &path).map_err(|e| err(e.to_string()))?;
        Ok(())
    }
}
