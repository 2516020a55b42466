//! Analysis run records: status, risk level, and the committed result set.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::pattern::EvidencePattern;
use super::scoring::{ScoreReport, ScoredContradiction};

/// Run-level risk classification derived from the severity
/// distribution of detected patterns. Ordering is ascending.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    #[default]
    Minimal,
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lifecycle state of an analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Running,
    Completed,
    Failed,
}

/// One complete execution of the extract → analyze → aggregate → score
/// pipeline over a document snapshot.
///
/// A run is committed as "current" only after it completes; readers
/// never observe a partially populated run. Completed runs are
/// retained in an append-only history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRun {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub status: RunStatus,
    /// All detected patterns, sorted by descending severity.
    pub patterns: Vec<EvidencePattern>,
    /// Scored patterns, sorted by descending weighted score.
    pub scored: Vec<ScoredContradiction>,
    /// Weighted score totals and category breakdown.
    pub score_report: ScoreReport,
    pub risk_level: RiskLevel,
    /// Mean pattern confidence, rounded; 0 when no patterns exist.
    pub confidence_score: u8,
    /// Version string of the weights snapshot used for scoring.
    pub weights_version: String,
    pub document_count: usize,
    /// Sum of document version counters in the snapshot.
    pub total_document_versions: u64,
    /// Per-document notes for degraded items (empty text, skipped checks).
    pub notes: Vec<String>,
}
