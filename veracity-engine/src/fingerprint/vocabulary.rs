//! Fixed vocabularies and compiled pattern families used by the
//! fingerprint extractor.
//!
//! All regexes here are compile-time constants; compilation cannot
//! fail for valid literals, so construction uses `expect`.

use std::sync::LazyLock;

use aho_corasick::AhoCorasick;
use regex::Regex;

/// Critical evidentiary terms matched case-insensitively as substrings.
pub const KEY_PHRASES: &[&str] = &[
    "chain of custody",
    "evidence log",
    "witness statement",
    "sworn testimony",
    "forensic report",
    "incident report",
    "probable cause",
    "custody transfer",
    "case file",
    "affidavit",
    "subpoena",
    "exhibit",
];

/// Roster of names-of-interest. Counts are recorded for every entry,
/// zero included.
pub const MONITORED_NAMES: &[&str] = &[
    "Noel",
    "Andy",
    "Maki",
    "Nicholas Williams",
    "Owen Williams",
];

/// Case-insensitive matcher over `KEY_PHRASES`.
pub static KEY_PHRASE_MATCHER: LazyLock<AhoCorasick> = LazyLock::new(|| {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(KEY_PHRASES)
        .expect("key-phrase vocabulary is a valid literal set")
});

/// Word-boundary, case-insensitive matchers for each monitored name.
pub static MONITORED_NAME_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> =
    LazyLock::new(|| {
        MONITORED_NAMES
            .iter()
            .map(|name| {
                let pattern = format!(r"(?i)\b{}\b", regex::escape(name));
                (
                    *name,
                    Regex::new(&pattern).expect("escaped name is a valid pattern"),
                )
            })
            .collect()
    });

/// Evidence/case identifier families. Patterns with a capture group
/// extract group 1; the generic `LL(L)-DD(DDDD)` family uses the whole
/// match.
pub static EVIDENCE_ID_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Labeled ids stay case-sensitive inside the capture so prose
        // after the label ("case remains open") is not mistaken for one.
        r"(?i)\bcase\s*(?:no\.?|number|#)?\s*[:#]?\s*((?-i:[A-Z0-9][A-Z0-9-]{3,12}))",
        r"(?i)\bevidence\s*(?:item|tag|no\.?|#)?\s*[:#]?\s*([A-Z]{1,3}-?\d{2,8})",
        r"(?i)\bbadge\s*(?:no\.?|number|#)?\s*[:#]?\s*(\d{3,6})",
        r"(?i)\breport\s*(?:no\.?|number|#)?\s*[:#]?\s*((?-i:[A-Z0-9][A-Z0-9-]{3,12}))",
        r"(?i)\bfile\s*(?:no\.?|number|#)?\s*[:#]?\s*((?-i:[A-Z0-9][A-Z0-9-]{3,12}))",
        r"\b[A-Z]{2,3}-\d{2,6}\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("evidence-id family is a valid pattern"))
    .collect()
});

/// Timestamp families: `MM/DD/YYYY`, `MM-DD-YYYY`, long-form month
/// names, and `HH:MM AM/PM` times.
pub static TIMESTAMP_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\b\d{1,2}/\d{1,2}/\d{4}\b",
        r"\b\d{1,2}-\d{1,2}-\d{4}\b",
        r"(?i)\b(?:january|february|march|april|may|june|july|august|september|october|november|december)\s+\d{1,2},?\s+\d{4}\b",
        r"(?i)\b\d{1,2}:\d{2}\s*(?:am|pm)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("timestamp family is a valid pattern"))
    .collect()
});

/// Date-only subset of `TIMESTAMP_PATTERNS`, used by the
/// intra-document timestamp inconsistency check.
pub static DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\b\d{1,2}/\d{1,2}/\d{4}\b",
        r"\b\d{1,2}-\d{1,2}-\d{4}\b",
        r"(?i)\b(?:january|february|march|april|may|june|july|august|september|october|november|december)\s+\d{1,2},?\s+\d{4}\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("date family is a valid pattern"))
    .collect()
});

/// Structural marker families, matched per line: all-caps labels,
/// numeric outlines, roman-numeral outlines.
pub static STRUCTURAL_MARKER_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^[A-Z][A-Z0-9 \t]{3,}:?\s*$",
        r"^\s*\d+(?:\.\d+)*[.)]\s+\S",
        r"^\s*[IVXLC]{1,7}[.)]\s+\S",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("structural-marker family is a valid pattern"))
    .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_code_family_matches_ll_dd_shapes() {
        let generic = &EVIDENCE_ID_PATTERNS[5];
        assert!(generic.is_match("EV-1421"));
        assert!(generic.is_match("CPS-004522"));
        assert!(!generic.is_match("EVID-1421"));
        assert!(!generic.is_match("E-1421"));
    }

    #[test]
    fn structural_markers_match_expected_lines() {
        assert!(STRUCTURAL_MARKER_PATTERNS[0].is_match("WITNESS STATEMENTS:"));
        assert!(STRUCTURAL_MARKER_PATTERNS[1].is_match("1.2) Findings"));
        assert!(STRUCTURAL_MARKER_PATTERNS[2].is_match("IV. Conclusions"));
        assert!(!STRUCTURAL_MARKER_PATTERNS[0].is_match("Narrative text here"));
    }

    #[test]
    fn timestamp_families_cover_spec_formats() {
        let hits: Vec<bool> = [
            "03/14/2024",
            "03-14-2024",
            "March 14, 2024",
            "11:45 PM",
        ]
        .iter()
        .map(|s| TIMESTAMP_PATTERNS.iter().any(|re| re.is_match(s)))
        .collect();
        assert!(hits.iter().all(|&b| b));
    }
}
