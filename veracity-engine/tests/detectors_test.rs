//! Cross-document detector tests over small revision sets.

use chrono::{TimeZone, Utc};
use veracity_core::types::{DocumentRecord, PatternKind, Severity};
use veracity_engine::{compare_documents, compare_pair, extract_fingerprint};

fn doc(id: &str, title: &str, text: &str, day: u32, hour: u32) -> DocumentRecord {
    DocumentRecord {
        id: id.to_string(),
        title: title.to_string(),
        text: Some(text.to_string()),
        uploaded_at: Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap(),
        modified_at: Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap(),
        version: 1,
    }
}

fn pair(
    a: &DocumentRecord,
    b: &DocumentRecord,
) -> Vec<veracity_core::types::EvidencePattern> {
    let fp_a = extract_fingerprint(a.text_or_empty(), &a.title);
    let fp_b = extract_fingerprint(b.text_or_empty(), &b.title);
    compare_pair(a, &fp_a, b, &fp_b)
}

#[test]
fn name_count_jump_of_four_is_one_critical_content_insertion() {
    let original = doc("d1", "Statement v1", "Noel attended the meeting.", 14, 9);
    let revised = doc(
        "d2",
        "Statement v2",
        "Noel met Noel. Noel questioned Noel while Noel waited.",
        14,
        15,
    );

    let patterns = pair(&original, &revised);
    assert_eq!(patterns.len(), 1, "{patterns:#?}");
    let p = &patterns[0];
    assert_eq!(p.kind, PatternKind::ContentInsertion);
    assert_eq!(p.severity, Severity::Critical);
    assert_eq!(p.confidence, 95);
    assert_eq!(p.location, "Statement v1 vs Statement v2 [Noel]");
    assert_eq!(p.documents, vec!["d1".to_string(), "d2".to_string()]);
}

#[test]
fn comparison_is_symmetric_in_argument_order() {
    let a = doc("d1", "Report v1", "Noel filed exhibit EV-1001 at the desk.", 14, 9);
    let b = doc("d2", "Report v2", "Noel and Noel filed exhibit EV-1002.", 14, 15);
    let fp_a = extract_fingerprint(a.text_or_empty(), &a.title);
    let fp_b = extract_fingerprint(b.text_or_empty(), &b.title);

    let forward = compare_pair(&a, &fp_a, &b, &fp_b);
    let reversed = compare_pair(&b, &fp_b, &a, &fp_a);
    assert_eq!(forward, reversed);
}

#[test]
fn identifier_churn_is_framed_from_the_earlier_document() {
    let earlier = doc("d1", "Log v1", "Filed under exhibit EV-1001 today.", 14, 9);
    let later = doc("d2", "Log v2", "Filed under exhibit EV-1002 today.", 14, 15);

    // Argument order reversed on purpose; framing follows upload time.
    let patterns = pair(&later, &earlier);
    let churn = patterns
        .iter()
        .find(|p| p.kind == PatternKind::CrossReferenceBreak)
        .expect("identifier churn pattern");
    assert_eq!(churn.severity, Severity::Critical);
    assert_eq!(churn.confidence, 90);
    assert!(churn.evidence.iter().any(|e| e == "added: EV-1002"));
    assert!(churn.evidence.iter().any(|e| e == "removed: EV-1001"));
    assert_eq!(churn.location, "Log v1 vs Log v2");
}

#[test]
fn hash_catch_all_fires_only_when_nothing_else_does() {
    let a = doc("d1", "Memo v1", "The shipment arrived on time.", 14, 9);
    let b = doc("d2", "Memo v2", "The shipment arrived two hours late.", 14, 15);

    let patterns = pair(&a, &b);
    assert_eq!(patterns.len(), 1, "{patterns:#?}");
    let p = &patterns[0];
    assert_eq!(p.kind, PatternKind::ContentInsertion);
    assert_eq!(p.severity, Severity::Medium);
    assert_eq!(p.confidence, 70);
}

#[test]
fn identical_normalized_content_yields_no_patterns() {
    let a = doc("d1", "Memo v1", "The shipment  ARRIVED on time.", 14, 9);
    let b = doc("d2", "Memo v2", "the shipment arrived on time.", 14, 15);
    assert!(pair(&a, &b).is_empty());
}

#[test]
fn structural_drift_requires_more_than_two_changed_markers() {
    let a = doc(
        "d1",
        "Report v1",
        "SUMMARY:\nbody text\nFINDINGS:\nbody text\nCONCLUSION:\nbody text\n",
        14,
        9,
    );
    let b = doc(
        "d2",
        "Report v2",
        "OVERVIEW:\nbody text\nRESULTS:\nbody text\nCLOSING REMARKS:\nbody text\n",
        14,
        15,
    );

    let patterns = pair(&a, &b);
    let drift = patterns
        .iter()
        .find(|p| p.kind == PatternKind::SignatureMismatch)
        .expect("structural drift pattern");
    // Six markers in the symmetric difference
    assert_eq!(drift.severity, Severity::High);
    assert_eq!(drift.confidence, 80);
}

#[test]
fn documents_on_different_days_are_never_compared() {
    let docs: Vec<_> = [
        doc("d1", "Day one", "Noel signed exhibit EV-1001.", 14, 9),
        doc("d2", "Day two", "Completely unrelated content here.", 15, 9),
    ]
    .into_iter()
    .map(|d| {
        let fp = extract_fingerprint(d.text_or_empty(), &d.title);
        (d, fp)
    })
    .collect();

    assert!(compare_documents(&docs).is_empty());
}

#[test]
fn three_same_day_documents_produce_three_pair_comparisons() {
    let docs: Vec<_> = [
        doc("d1", "Rev 1", "First wording of the account.", 14, 9),
        doc("d2", "Rev 2", "Second wording of the account.", 14, 12),
        doc("d3", "Rev 3", "Third wording of the account.", 14, 15),
    ]
    .into_iter()
    .map(|d| {
        let fp = extract_fingerprint(d.text_or_empty(), &d.title);
        (d, fp)
    })
    .collect();

    // Each pair differs only by content, so each yields one catch-all.
    let patterns = compare_documents(&docs);
    assert_eq!(patterns.len(), 3, "{patterns:#?}");
    assert!(patterns.iter().all(|p| p.kind == PatternKind::ContentInsertion));
}

#[test]
fn tie_on_upload_time_breaks_by_document_id() {
    let a = doc("a-first", "Copy A", "Noel was present.", 14, 9);
    let b = doc("b-second", "Copy B", "Noel was present, twice Noel.", 14, 9);

    let patterns = pair(&b, &a);
    assert!(!patterns.is_empty());
    assert_eq!(patterns[0].location, "Copy A vs Copy B [Noel]");
    assert_eq!(patterns[0].documents[0], "a-first");
}

#[test]
fn pattern_ids_are_stable_across_runs() {
    let a = doc("d1", "Log v1", "Filed under exhibit EV-1001 today.", 14, 9);
    let b = doc("d2", "Log v2", "Filed under exhibit EV-1002 today.", 14, 15);

    let first = pair(&a, &b);
    let second = pair(&a, &b);
    let ids = |patterns: &[veracity_core::types::EvidencePattern]| {
        patterns.iter().map(|p| p.id.clone()).collect::<Vec<_>>()
    };
    assert_eq!(ids(&first), ids(&second));
}
