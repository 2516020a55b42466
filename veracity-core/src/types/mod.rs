//! Shared data model for the analysis pipeline.

pub mod document;
pub mod pattern;
pub mod run;
pub mod scoring;

pub use document::DocumentRecord;
pub use pattern::{EvidencePattern, PatternKind, Severity};
pub use run::{AnalysisRun, RiskLevel, RunStatus};
pub use scoring::{ScoreBreakdown, ScoreReport, ScoredContradiction};
