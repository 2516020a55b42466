//! Detection rule table: thresholds, confidence formulas, severity
//! mappings, and the pattern-kind → weight-key resolution.
//!
//! The constants are empirically chosen operating points carried over
//! from field use. They are tunable values, not derived quantities;
//! keeping them in one table lets the rules be tested independent of
//! any text corpus.

use std::sync::LazyLock;

use regex::Regex;
use veracity_core::types::{PatternKind, Severity};

/// The six fixed redaction indicator patterns.
pub static REDACTION_INDICATORS: LazyLock<Vec<(&'static str, Regex)>> =
    LazyLock::new(|| {
        [
            ("[REDACTED] marker", r"\[REDACTED\]"),
            ("asterisk run", r"\*{3,}"),
            ("underscore run", r"_{4,}"),
            ("[REMOVED] marker", r"\[REMOVED\]"),
            ("[DELETED] marker", r"\[DELETED\]"),
            ("empty bracket pair", r"\[\s*\]"),
        ]
        .iter()
        .map(|(label, p)| {
            (*label, Regex::new(p).expect("redaction indicator is a valid pattern"))
        })
        .collect()
    });

pub const REDACTION_SEVERITY: Severity = Severity::Medium;
pub const REDACTION_CONFIDENCE: u8 = 85;

/// Indentation change (chars) counted as a formatting jump.
pub const FORMATTING_INDENT_JUMP: usize = 8;
/// Jumps tolerated before a formatting irregularity fires.
pub const FORMATTING_MAX_JUMPS: usize = 5;
pub const FORMATTING_SEVERITY: Severity = Severity::Low;
pub const FORMATTING_CONFIDENCE: u8 = 60;

/// Distinct date strings tolerated within one document.
pub const INTRA_DOC_DATE_LIMIT: usize = 3;
pub const INTRA_DOC_DATE_SEVERITY: Severity = Severity::Medium;
pub const INTRA_DOC_DATE_CONFIDENCE: u8 = 75;

/// Severity for a monitored-name count difference between same-day
/// documents.
pub fn name_drift_severity(diff: u32) -> Severity {
    if diff > 3 {
        Severity::Critical
    } else if diff > 1 {
        Severity::High
    } else {
        Severity::Medium
    }
}

/// Confidence for a monitored-name count difference: `min(95, 60 + diff×15)`.
pub fn name_drift_confidence(diff: u32) -> u8 {
    95.min(60 + diff.saturating_mul(15)) as u8
}

pub const ID_CHURN_SEVERITY: Severity = Severity::Critical;
/// Fixed regardless of how many identifiers changed.
pub const ID_CHURN_CONFIDENCE: u8 = 90;

/// Symmetric-difference cardinality a marker set must exceed to fire.
pub const STRUCTURAL_DRIFT_MIN: usize = 2;

pub fn structural_drift_severity(diff: usize) -> Severity {
    if diff > 5 {
        Severity::High
    } else {
        Severity::Medium
    }
}

/// Confidence for structural drift: `min(85, 50 + diff×5)`.
pub fn structural_drift_confidence(diff: usize) -> u8 {
    85.min(50 + diff.saturating_mul(5)) as u8
}

/// Catch-all for content changes the specific checks missed.
pub const HASH_MISMATCH_SEVERITY: Severity = Severity::Medium;
pub const HASH_MISMATCH_CONFIDENCE: u8 = 70;

/// Neutral weight used when a pattern kind has no entry in the
/// current weights snapshot.
pub const NEUTRAL_WEIGHT: f64 = 0.5;

/// Default display cap for the run score total.
pub const DEFAULT_DISPLAY_CAP: f64 = 100.0;

/// Resolve a pattern kind to its (weight category, rule name) key.
pub fn weight_key(kind: PatternKind) -> (&'static str, &'static str) {
    match kind {
        PatternKind::SignatureMismatch => ("document_integrity", "signature_mismatch"),
        PatternKind::ContentInsertion => ("document_integrity", "content_insertion"),
        PatternKind::RedactionTraces => ("document_integrity", "redaction_traces"),
        PatternKind::TimestampManipulation => {
            ("document_integrity", "timestamp_manipulation")
        }
        PatternKind::CrossReferenceBreak => {
            ("pattern_analysis", "cross_reference_break")
        }
    }
}

/// Category-specific severity multiplier policy. Explicit and small:
/// only critical findings in the two sensitive categories are
/// elevated; everything else scores at 1.0.
pub fn severity_multiplier(category: &str, severity: Severity) -> f64 {
    match (category, severity) {
        ("legal_violations", Severity::Critical) => 1.25,
        ("document_integrity", Severity::Critical) => 1.15,
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_drift_severity_thresholds() {
        assert_eq!(name_drift_severity(1), Severity::Medium);
        assert_eq!(name_drift_severity(2), Severity::High);
        assert_eq!(name_drift_severity(3), Severity::High);
        assert_eq!(name_drift_severity(4), Severity::Critical);
    }

    #[test]
    fn name_drift_confidence_caps_at_95() {
        assert_eq!(name_drift_confidence(1), 75);
        assert_eq!(name_drift_confidence(2), 90);
        assert_eq!(name_drift_confidence(3), 95);
        assert_eq!(name_drift_confidence(40), 95);
    }

    #[test]
    fn structural_drift_formulas() {
        assert_eq!(structural_drift_severity(3), Severity::Medium);
        assert_eq!(structural_drift_severity(6), Severity::High);
        assert_eq!(structural_drift_confidence(3), 65);
        assert_eq!(structural_drift_confidence(10), 85);
    }

    #[test]
    fn redaction_indicators_match_fixed_forms() {
        let matches = |text: &str| {
            REDACTION_INDICATORS
                .iter()
                .any(|(_, re)| re.is_match(text))
        };
        assert!(matches("[REDACTED]"));
        assert!(matches("name: ****"));
        assert!(matches("signature: _____"));
        assert!(matches("[REMOVED]"));
        assert!(matches("[DELETED]"));
        assert!(matches("items: [  ]"));
        assert!(!matches("nothing to see"));
    }

    #[test]
    fn every_kind_resolves_to_a_weight_key() {
        for kind in [
            PatternKind::SignatureMismatch,
            PatternKind::ContentInsertion,
            PatternKind::RedactionTraces,
            PatternKind::TimestampManipulation,
            PatternKind::CrossReferenceBreak,
        ] {
            let (category, name) = weight_key(kind);
            assert!(!category.is_empty());
            assert!(!name.is_empty());
        }
    }

    #[test]
    fn builtin_detector_weight_entries_are_all_reachable() {
        use rustc_hash::FxHashSet;
        use veracity_core::config::RuleWeightsConfig;

        let reachable: FxHashSet<(&str, &str)> = [
            PatternKind::SignatureMismatch,
            PatternKind::ContentInsertion,
            PatternKind::RedactionTraces,
            PatternKind::TimestampManipulation,
            PatternKind::CrossReferenceBreak,
        ]
        .into_iter()
        .map(weight_key)
        .collect();

        let defaults = RuleWeightsConfig::builtin_defaults();
        // Every default entry in the detector-fed categories must be
        // resolvable, or tuning it would silently do nothing.
        for category in ["document_integrity", "pattern_analysis"] {
            for name in defaults.weights[category].keys() {
                assert!(
                    reachable.contains(&(category, name.as_str())),
                    "default weight {category}/{name} is unreachable"
                );
            }
        }
    }

    #[test]
    fn multiplier_policy_is_explicit() {
        assert_eq!(severity_multiplier("legal_violations", Severity::Critical), 1.25);
        assert_eq!(severity_multiplier("document_integrity", Severity::Critical), 1.15);
        assert_eq!(severity_multiplier("document_integrity", Severity::High), 1.0);
        assert_eq!(severity_multiplier("pattern_analysis", Severity::Critical), 1.0);
    }
}
