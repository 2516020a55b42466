//! Weighted scoring outputs: per-pattern scores and run totals.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::pattern::EvidencePattern;

/// Per-factor breakdown of one weighted score, kept for auditability.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Pattern confidence on a 0.0–1.0 scale.
    pub confidence_factor: f64,
    /// Matched rule weight in [0, 1], or the neutral default.
    pub pattern_weight: f64,
    /// Category-specific severity multiplier (1.0 unless elevated).
    pub severity_multiplier: f64,
}

/// A pattern joined with its matched rule weight. Derived data:
/// recomputed on every run, never patched in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredContradiction {
    pub pattern: EvidencePattern,
    /// Weight category the pattern kind resolved to.
    pub category: String,
    /// Rule name within the category.
    pub rule_name: String,
    /// `confidence_factor × pattern_weight × severity_multiplier × 100`.
    pub weighted_score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Run-level score totals.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScoreReport {
    /// Uncapped sum of weighted scores.
    pub total_raw: f64,
    /// Sum capped at `display_cap` for presentation.
    pub total_display: f64,
    /// Display cap in effect (default 100).
    pub display_cap: f64,
    /// Sum of weighted scores grouped by weight category.
    pub by_category: BTreeMap<String, f64>,
}

impl ScoreReport {
    /// Build a report from scored contradictions and a display cap.
    pub fn from_scored(scored: &[ScoredContradiction], display_cap: f64) -> Self {
        let mut by_category: BTreeMap<String, f64> = BTreeMap::new();
        let mut total_raw = 0.0;
        for s in scored {
            total_raw += s.weighted_score;
            *by_category.entry(s.category.clone()).or_insert(0.0) += s.weighted_score;
        }
        Self {
            total_raw,
            total_display: total_raw.min(display_cap),
            display_cap,
            by_category,
        }
    }
}
