//! Detected anomaly patterns and their severity scale.

use std::fmt;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

/// Enumerated tampering-signal categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// Formatting irregularities suggesting a different origin.
    SignatureMismatch,
    /// Content that differs between revisions of the same event.
    ContentInsertion,
    /// Visible traces of redaction markers in the text.
    RedactionTraces,
    /// Internally inconsistent or churned date references.
    TimestampManipulation,
    /// Evidence identifiers added or removed between revisions.
    CrossReferenceBreak,
}

impl PatternKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SignatureMismatch => "signature_mismatch",
            Self::ContentInsertion => "content_insertion",
            Self::RedactionTraces => "redaction_traces",
            Self::TimestampManipulation => "timestamp_manipulation",
            Self::CrossReferenceBreak => "cross_reference_break",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pattern severity. Ordering is ascending: `Low < Medium < High < Critical`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One detected anomaly. Immutable once created; the aggregator and
/// scoring engine only read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidencePattern {
    /// Deterministic identifier derived from kind, location, and
    /// implicated documents. Identical input produces identical ids
    /// across runs.
    pub id: String,
    pub kind: PatternKind,
    pub severity: Severity,
    /// Human-readable description of the anomaly.
    pub description: String,
    /// Supporting evidence strings, in detection order.
    pub evidence: Vec<String>,
    /// Detection confidence in [0, 100].
    pub confidence: u8,
    /// Location tag (document title or "title_a vs title_b").
    pub location: String,
    /// Identifiers of the implicated documents.
    pub documents: Vec<String>,
}

impl EvidencePattern {
    /// Build a pattern, deriving its deterministic id.
    pub fn new(
        kind: PatternKind,
        severity: Severity,
        description: impl Into<String>,
        evidence: Vec<String>,
        confidence: u8,
        location: impl Into<String>,
        documents: Vec<String>,
    ) -> Self {
        let location = location.into();
        let id = pattern_id(kind, &location, &documents);
        Self {
            id,
            kind,
            severity,
            description: description.into(),
            evidence,
            confidence: confidence.min(100),
            location,
            documents,
        }
    }

    /// Confidence on a 0.0–1.0 scale, as consumed by the scoring engine.
    pub fn confidence_factor(&self) -> f64 {
        f64::from(self.confidence) / 100.0
    }
}

/// Stable pattern id: xxh3 over the identity fields, hex-encoded.
fn pattern_id(kind: PatternKind, location: &str, documents: &[String]) -> String {
    let mut key = String::with_capacity(64);
    key.push_str(kind.name());
    key.push_str("::");
    key.push_str(location);
    for doc in documents {
        key.push_str("::");
        key.push_str(doc);
    }
    format!("{:016x}", xxh3_64(key.as_bytes()))
}
