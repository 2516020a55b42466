//! Tests for fingerprint extraction over realistic document text.

use proptest::prelude::*;
use veracity_engine::fingerprint::{content_hash, normalize_text};
use veracity_engine::{extract_fingerprint, DocumentFingerprint};

const REPORT: &str = "\
INCIDENT SUMMARY:

On the evening in question, Officer Noel responded to the scene. \
The chain of custody for exhibit EV-2041 was logged at 10:15 PM. \
Noel filed the report under case 24-CR-0112.

WITNESS STATEMENTS:

Andy stated that the evidence log was signed and dated 03/14/2024. \
The forensic analysis references exhibit EV-2041 again.
";

fn fp(text: &str) -> DocumentFingerprint {
    extract_fingerprint(text, "report")
}

#[test]
fn extraction_is_deterministic() {
    let a = fp(REPORT);
    let b = fp(REPORT);
    assert_eq!(a, b);
}

#[test]
fn normalization_collapses_case_and_whitespace() {
    assert_eq!(normalize_text("A  B\t\nC"), "a b c");
    assert_eq!(content_hash("Chain of Custody"), content_hash("chain   OF\ncustody"));
}

#[test]
fn reordered_content_changes_the_hash() {
    assert_ne!(content_hash("alpha beta"), content_hash("beta alpha"));
}

#[test]
fn key_phrases_keep_first_occurrence_order() {
    let fingerprint = fp(REPORT);
    let position = |phrase: &str| {
        fingerprint
            .key_phrases
            .iter()
            .position(|p| p == phrase)
            .unwrap_or_else(|| panic!("missing {phrase:?} in {:?}", fingerprint.key_phrases))
    };
    assert!(position("chain of custody") < position("evidence log"));
}

#[test]
fn name_counts_cover_the_full_roster_with_zeros() {
    let fingerprint = fp(REPORT);
    assert_eq!(fingerprint.name_counts.get("Noel"), Some(&2));
    assert_eq!(fingerprint.name_counts.get("Andy"), Some(&1));
    // Unmentioned roster names are present with a zero count.
    assert_eq!(fingerprint.name_counts.get("Maki"), Some(&0));
}

#[test]
fn evidence_ids_are_uppercased() {
    let fingerprint = fp(REPORT);
    assert!(fingerprint.evidence_ids.contains("EV-2041"));
    assert!(fingerprint.evidence_ids.contains("24-CR-0112"));
}

#[test]
fn label_followed_by_prose_is_not_an_identifier() {
    let fingerprint = fp("The case remains open and the report was amended later.");
    assert!(fingerprint.evidence_ids.is_empty(), "{:?}", fingerprint.evidence_ids);
}

#[test]
fn timestamps_and_dates_are_collected() {
    let fingerprint = fp(REPORT);
    assert!(fingerprint.timestamps.contains("10:15 PM"));
    assert!(fingerprint.timestamps.contains("03/14/2024"));
}

#[test]
fn structural_markers_capture_headers() {
    let fingerprint = fp(REPORT);
    assert!(fingerprint
        .structural_markers
        .iter()
        .any(|m| m.contains("INCIDENT SUMMARY")));
    assert!(fingerprint
        .structural_markers
        .iter()
        .any(|m| m.contains("WITNESS STATEMENTS")));
}

#[test]
fn empty_text_yields_an_empty_fingerprint() {
    let fingerprint = fp("");
    assert!(fingerprint.key_phrases.is_empty());
    assert!(fingerprint.evidence_ids.is_empty());
    assert_eq!(fingerprint.paragraph_count, 0);
    // Roster keys are still present.
    assert_eq!(fingerprint.name_counts.len(), 5);
}

proptest! {
    #[test]
    fn normalize_is_a_fixpoint(text in ".{0,200}") {
        let once = normalize_text(&text);
        prop_assert_eq!(normalize_text(&once), once);
    }

    #[test]
    fn extraction_never_panics(text in ".{0,400}") {
        let _ = extract_fingerprint(&text, "fuzz");
    }
}
