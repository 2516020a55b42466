//! Pattern aggregation: severity counts, run-level risk, mean
//! confidence, and the deterministic presentation order.

use serde::{Deserialize, Serialize};
use veracity_core::types::{EvidencePattern, RiskLevel, Severity};

/// Per-run rollup over all detected patterns.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PatternSummary {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub risk_level: RiskLevel,
    /// Arithmetic mean of pattern confidences, rounded; 0 with no patterns.
    pub confidence_score: u8,
}

/// Sort patterns by descending severity (stable for equal severity)
/// and compute the run rollup. Sorting here normalizes any emission
/// order differences introduced by parallel pair comparison.
pub fn aggregate(patterns: &mut Vec<EvidencePattern>) -> PatternSummary {
    patterns.sort_by(|a, b| b.severity.cmp(&a.severity));

    let count = |s: Severity| patterns.iter().filter(|p| p.severity == s).count();
    let critical = count(Severity::Critical);
    let high = count(Severity::High);
    let medium = count(Severity::Medium);
    let low = count(Severity::Low);

    let confidence_score = if patterns.is_empty() {
        0
    } else {
        let sum: u32 = patterns.iter().map(|p| u32::from(p.confidence)).sum();
        ((sum as f64) / (patterns.len() as f64)).round() as u8
    };

    PatternSummary {
        critical,
        high,
        medium,
        low,
        risk_level: risk_level(critical, high, medium),
        confidence_score,
    }
}

/// Risk ladder over the severity distribution.
pub fn risk_level(critical: usize, high: usize, medium: usize) -> RiskLevel {
    if critical > 0 {
        RiskLevel::Critical
    } else if high > 2 || (high >= 1 && medium > 3) {
        RiskLevel::High
    } else if high >= 1 || medium > 2 {
        RiskLevel::Moderate
    } else if medium >= 1 {
        RiskLevel::Low
    } else {
        RiskLevel::Minimal
    }
}
