//! Cross-document comparison within same-day upload groups.
//!
//! Only documents sharing the same calendar date of upload are
//! compared, reflecting the "revisions of the same event" grouping.
//! Every unordered pair in a date group runs four checks:
//! monitored-name drift, evidence-identifier churn, structural-marker
//! drift, and the content-hash catch-all. The pair is ordered
//! earlier/later by upload timestamp before comparison, so the
//! added/removed framing of identifier churn is stable regardless of
//! input order.

use chrono::NaiveDate;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use veracity_core::types::{DocumentRecord, EvidencePattern, PatternKind};

use super::rules;
use crate::fingerprint::DocumentFingerprint;

/// Compare every same-day pair across the document set. Pair work is
/// parallel; the caller's aggregation sort restores deterministic
/// ordering.
pub fn compare_documents(
    docs: &[(DocumentRecord, DocumentFingerprint)],
) -> Vec<EvidencePattern> {
    let mut groups: FxHashMap<NaiveDate, Vec<usize>> = FxHashMap::default();
    for (idx, (doc, _)) in docs.iter().enumerate() {
        groups.entry(doc.upload_day()).or_default().push(idx);
    }

    let pairs: Vec<(usize, usize)> = groups
        .values()
        .flat_map(|members| {
            let mut pairs = Vec::new();
            for i in 0..members.len() {
                for j in (i + 1)..members.len() {
                    pairs.push((members[i], members[j]));
                }
            }
            pairs
        })
        .collect();

    pairs
        .par_iter()
        .flat_map(|&(i, j)| {
            let (doc_a, fp_a) = &docs[i];
            let (doc_b, fp_b) = &docs[j];
            compare_pair(doc_a, fp_a, doc_b, fp_b)
        })
        .collect()
}

/// Compare one pair of fingerprints. Symmetric in the set of anomaly
/// types detected; only the added/removed identifier framing depends
/// on which document is earlier by upload timestamp.
pub fn compare_pair(
    doc_a: &DocumentRecord,
    fp_a: &DocumentFingerprint,
    doc_b: &DocumentRecord,
    fp_b: &DocumentFingerprint,
) -> Vec<EvidencePattern> {
    // Stable earlier/later designation: upload timestamp, then id.
    let ((earlier, fp_e), (later, fp_l)) = if (doc_a.uploaded_at, &doc_a.id)
        <= (doc_b.uploaded_at, &doc_b.id)
    {
        ((doc_a, fp_a), (doc_b, fp_b))
    } else {
        ((doc_b, fp_b), (doc_a, fp_a))
    };

    let location = format!("{} vs {}", earlier.title, later.title);
    let documents = vec![earlier.id.clone(), later.id.clone()];
    let mut patterns = Vec::new();

    name_frequency_drift(fp_e, fp_l, &location, &documents, &mut patterns);
    identifier_churn(fp_e, fp_l, &location, &documents, &mut patterns);
    structural_drift(fp_e, fp_l, &location, &documents, &mut patterns);
    // Catch-all for changes the specific checks above did not capture.
    if patterns.is_empty() {
        hash_mismatch(fp_e, fp_l, &location, &documents, &mut patterns);
    }

    patterns
}

/// One `content_insertion` pattern per monitored name whose count
/// differs between the two documents.
fn name_frequency_drift(
    fp_e: &DocumentFingerprint,
    fp_l: &DocumentFingerprint,
    location: &str,
    documents: &[String],
    out: &mut Vec<EvidencePattern>,
) {
    for (name, &count_e) in &fp_e.name_counts {
        let count_l = fp_l.name_counts.get(name).copied().unwrap_or(0);
        let diff = count_e.abs_diff(count_l);
        if diff == 0 {
            continue;
        }
        out.push(EvidencePattern::new(
            PatternKind::ContentInsertion,
            rules::name_drift_severity(diff),
            format!("Mention count for \"{name}\" changed between revisions"),
            vec![
                format!("{name}: {count_e} occurrence(s) in earlier document"),
                format!("{name}: {count_l} occurrence(s) in later document"),
            ],
            rules::name_drift_confidence(diff),
            format!("{location} [{name}]"),
            documents.to_vec(),
        ));
    }
}

/// One `cross_reference_break` pattern when the identifier sets
/// differ, framed as added/removed relative to the earlier document.
fn identifier_churn(
    fp_e: &DocumentFingerprint,
    fp_l: &DocumentFingerprint,
    location: &str,
    documents: &[String],
    out: &mut Vec<EvidencePattern>,
) {
    let added: Vec<&String> = fp_l.evidence_ids.difference(&fp_e.evidence_ids).collect();
    let removed: Vec<&String> = fp_e.evidence_ids.difference(&fp_l.evidence_ids).collect();
    if added.is_empty() && removed.is_empty() {
        return;
    }

    let mut evidence = Vec::new();
    if !added.is_empty() {
        evidence.push(format!(
            "added: {}",
            added.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(", ")
        ));
    }
    if !removed.is_empty() {
        evidence.push(format!(
            "removed: {}",
            removed.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(", ")
        ));
    }

    out.push(EvidencePattern::new(
        PatternKind::CrossReferenceBreak,
        rules::ID_CHURN_SEVERITY,
        "Evidence identifiers changed between revisions".to_string(),
        evidence,
        rules::ID_CHURN_CONFIDENCE,
        location.to_string(),
        documents.to_vec(),
    ));
}

/// Structural-marker symmetric difference above the threshold.
fn structural_drift(
    fp_e: &DocumentFingerprint,
    fp_l: &DocumentFingerprint,
    location: &str,
    documents: &[String],
    out: &mut Vec<EvidencePattern>,
) {
    let set_e: rustc_hash::FxHashSet<&str> =
        fp_e.structural_markers.iter().map(String::as_str).collect();
    let set_l: rustc_hash::FxHashSet<&str> =
        fp_l.structural_markers.iter().map(String::as_str).collect();
    let diff = set_e.symmetric_difference(&set_l).count();
    if diff <= rules::STRUCTURAL_DRIFT_MIN {
        return;
    }

    out.push(EvidencePattern::new(
        PatternKind::SignatureMismatch,
        rules::structural_drift_severity(diff),
        "Document structure diverged between revisions".to_string(),
        vec![format!("{diff} structural markers differ")],
        rules::structural_drift_confidence(diff),
        location.to_string(),
        documents.to_vec(),
    ));
}

/// Content-hash catch-all: any difference in the normalized hash
/// signals a change the specific checks may have missed.
fn hash_mismatch(
    fp_e: &DocumentFingerprint,
    fp_l: &DocumentFingerprint,
    location: &str,
    documents: &[String],
    out: &mut Vec<EvidencePattern>,
) {
    if fp_e.content_hash == fp_l.content_hash {
        return;
    }
    out.push(EvidencePattern::new(
        PatternKind::ContentInsertion,
        rules::HASH_MISMATCH_SEVERITY,
        "Normalized content differs between revisions".to_string(),
        vec![format!(
            "content hash {:016x} vs {:016x}",
            fp_e.content_hash, fp_l.content_hash
        )],
        rules::HASH_MISMATCH_CONFIDENCE,
        location.to_string(),
        documents.to_vec(),
    ));
}
