//! Veracity analysis engine.
//!
//! Pipeline stages, leaves first: fingerprint extraction, the
//! single-document and cross-document detectors, pattern aggregation,
//! weighted scoring against the current rule-weights snapshot, and the
//! run coordinator that orchestrates one full pass and commits the
//! result atomically.

pub mod detectors;
pub mod fingerprint;
pub mod patterns;
pub mod runner;
pub mod scoring;
pub mod weights;

pub use detectors::{analyze_document, compare_documents, compare_pair};
pub use fingerprint::{extract_fingerprint, DocumentFingerprint};
pub use patterns::{aggregate, PatternSummary};
pub use runner::{
    AnalysisCoordinator, ArtifactWriter, CoordinatorConfig, DocumentSource,
    JsonFileSource, StaticSource, Trigger, WatchHandle,
};
pub use scoring::{score_patterns, ScoringOutput};
pub use weights::{FileMtimeProbe, ReloadOutcome, WeightsSnapshot, WeightsStore};
