//! Weighted scoring against the current rule-weights snapshot.
//!
//! `weighted_score = base_confidence × rule_weight × severity_multiplier × 100`,
//! with every factor captured in the breakdown for auditability. A
//! pattern kind with no weight entry scores with the neutral default
//! instead of failing the run.

use veracity_core::config::RuleWeightsConfig;
use veracity_core::errors::ScoringError;
use veracity_core::types::{
    EvidencePattern, ScoreBreakdown, ScoreReport, ScoredContradiction,
};

use crate::detectors::rules;

/// Scored patterns plus the run totals and any recovered scoring
/// faults (surfaced as run notes, never fatal).
#[derive(Debug, Default)]
pub struct ScoringOutput {
    /// Sorted by descending weighted score, stable for ties.
    pub scored: Vec<ScoredContradiction>,
    pub report: ScoreReport,
    pub faults: Vec<ScoringError>,
}

/// Score every pattern against the weights snapshot.
pub fn score_patterns(
    patterns: &[EvidencePattern],
    weights: &RuleWeightsConfig,
    display_cap: f64,
) -> ScoringOutput {
    let mut faults = Vec::new();
    let mut scored: Vec<ScoredContradiction> = patterns
        .iter()
        .map(|pattern| score_one(pattern, weights, &mut faults))
        .collect();

    scored.sort_by(|a, b| {
        b.weighted_score
            .partial_cmp(&a.weighted_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let report = ScoreReport::from_scored(&scored, display_cap);
    ScoringOutput {
        scored,
        report,
        faults,
    }
}

fn score_one(
    pattern: &EvidencePattern,
    weights: &RuleWeightsConfig,
    faults: &mut Vec<ScoringError>,
) -> ScoredContradiction {
    let (category, rule_name) = rules::weight_key(pattern.kind);

    let pattern_weight = match weights.weight_for(category, rule_name) {
        Some(w) => w,
        None => {
            faults.push(ScoringError::NoMatchingWeight {
                category: category.to_string(),
                name: rule_name.to_string(),
            });
            rules::NEUTRAL_WEIGHT
        }
    };

    let breakdown = ScoreBreakdown {
        confidence_factor: pattern.confidence_factor(),
        pattern_weight,
        severity_multiplier: rules::severity_multiplier(category, pattern.severity),
    };
    let mut weighted_score = breakdown.confidence_factor
        * breakdown.pattern_weight
        * breakdown.severity_multiplier
        * 100.0;
    if !weighted_score.is_finite() {
        faults.push(ScoringError::NonFiniteScore {
            pattern_id: pattern.id.clone(),
        });
        weighted_score = 0.0;
    }

    ScoredContradiction {
        pattern: pattern.clone(),
        category: category.to_string(),
        rule_name: rule_name.to_string(),
        weighted_score,
        breakdown,
    }
}
