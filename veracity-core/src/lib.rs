//! Core types, errors, rule-weights configuration, and events for the
//! Veracity evidence-integrity engine.
//!
//! This crate has no dependency on the analysis engine. It defines the
//! data model shared across the workspace: document snapshots,
//! detected patterns, analysis runs, the scoring weight configuration,
//! the error taxonomy, and the engine event surface.

pub mod config;
pub mod errors;
pub mod events;
pub mod types;

pub use config::{ConfidenceThresholds, RuleWeightsConfig, WeightCategory};
pub use errors::{ConfigError, EngineError, InputError, RunError, RunResult, ScoringError};
pub use types::{
    AnalysisRun, DocumentRecord, EvidencePattern, PatternKind, RiskLevel, RunStatus,
    ScoreBreakdown, ScoreReport, ScoredContradiction, Severity,
};
