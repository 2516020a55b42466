//! Single-document integrity analysis.
//!
//! Three self-contained checks per document: redaction traces,
//! formatting irregularity, and intra-document timestamp
//! inconsistency. The checks are independent and additive; no check
//! suppresses another, and a clean document yields zero patterns.

use rustc_hash::FxHashSet;
use veracity_core::types::{DocumentRecord, EvidencePattern, PatternKind};

use super::rules;
use crate::fingerprint::vocabulary::DATE_PATTERNS;

/// Scan one document for self-contained anomalies.
pub fn analyze_document(doc: &DocumentRecord) -> Vec<EvidencePattern> {
    let text = doc.text_or_empty();
    let mut patterns = Vec::new();

    if let Some(p) = detect_redaction_traces(doc, text) {
        patterns.push(p);
    }
    if let Some(p) = detect_formatting_irregularity(doc, text) {
        patterns.push(p);
    }
    if let Some(p) = detect_date_inconsistency(doc, text) {
        patterns.push(p);
    }
    patterns
}

/// Any hit on the six fixed indicator patterns produces one
/// `redaction_traces` pattern carrying the match count and a sample.
fn detect_redaction_traces(doc: &DocumentRecord, text: &str) -> Option<EvidencePattern> {
    let mut count = 0usize;
    let mut sample: Option<String> = None;
    for (label, re) in rules::REDACTION_INDICATORS.iter() {
        for mat in re.find_iter(text) {
            count += 1;
            if sample.is_none() {
                sample = Some(format!("{}: {:?}", label, mat.as_str()));
            }
        }
    }
    let sample = sample?;

    Some(EvidencePattern::new(
        PatternKind::RedactionTraces,
        rules::REDACTION_SEVERITY,
        format!("Redaction markers present in \"{}\"", doc.title),
        vec![format!("{count} redaction marker(s) found"), sample],
        rules::REDACTION_CONFIDENCE,
        doc.title.clone(),
        vec![doc.id.clone()],
    ))
}

/// Count indentation jumps larger than `FORMATTING_INDENT_JUMP`
/// between consecutive non-empty lines; more than
/// `FORMATTING_MAX_JUMPS` of them fires a `signature_mismatch`.
fn detect_formatting_irregularity(
    doc: &DocumentRecord,
    text: &str,
) -> Option<EvidencePattern> {
    let mut jumps = 0usize;
    let mut prev_indent: Option<usize> = None;
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let indent = line.len() - line.trim_start().len();
        if let Some(prev) = prev_indent {
            if indent.abs_diff(prev) > rules::FORMATTING_INDENT_JUMP {
                jumps += 1;
            }
        }
        prev_indent = Some(indent);
    }

    if jumps <= rules::FORMATTING_MAX_JUMPS {
        return None;
    }

    Some(EvidencePattern::new(
        PatternKind::SignatureMismatch,
        rules::FORMATTING_SEVERITY,
        format!("Irregular formatting in \"{}\"", doc.title),
        vec![format!(
            "{jumps} indentation jumps larger than {} characters",
            rules::FORMATTING_INDENT_JUMP
        )],
        rules::FORMATTING_CONFIDENCE,
        doc.title.clone(),
        vec![doc.id.clone()],
    ))
}

/// More than `INTRA_DOC_DATE_LIMIT` distinct date strings in one
/// document fires a `timestamp_manipulation` pattern.
fn detect_date_inconsistency(doc: &DocumentRecord, text: &str) -> Option<EvidencePattern> {
    let mut dates: FxHashSet<String> = FxHashSet::default();
    for re in DATE_PATTERNS.iter() {
        for mat in re.find_iter(text) {
            dates.insert(mat.as_str().to_string());
        }
    }

    if dates.len() <= rules::INTRA_DOC_DATE_LIMIT {
        return None;
    }

    let mut sorted: Vec<String> = dates.into_iter().collect();
    sorted.sort();
    Some(EvidencePattern::new(
        PatternKind::TimestampManipulation,
        rules::INTRA_DOC_DATE_SEVERITY,
        format!("Inconsistent dates within \"{}\"", doc.title),
        sorted,
        rules::INTRA_DOC_DATE_CONFIDENCE,
        doc.title.clone(),
        vec![doc.id.clone()],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn doc(text: &str) -> DocumentRecord {
        DocumentRecord {
            id: "doc-1".to_string(),
            title: "Incident Report".to_string(),
            text: Some(text.to_string()),
            uploaded_at: Utc::now(),
            modified_at: Utc::now(),
            version: 1,
        }
    }

    #[test]
    fn three_redacted_tokens_fire_once_with_count() {
        let d = doc("Name [REDACTED] spoke to [REDACTED] about [REDACTED].");
        let patterns = analyze_document(&d);
        assert_eq!(patterns.len(), 1);
        let p = &patterns[0];
        assert_eq!(p.kind, PatternKind::RedactionTraces);
        assert_eq!(p.severity, rules::REDACTION_SEVERITY);
        assert_eq!(p.confidence, 85);
        assert!(p.evidence[0].starts_with("3 redaction marker"));
    }

    #[test]
    fn clean_document_yields_no_patterns() {
        let d = doc("A short, tidy report.\nNothing unusual here.");
        assert!(analyze_document(&d).is_empty());
    }

    #[test]
    fn missing_text_yields_no_patterns() {
        let mut d = doc("");
        d.text = None;
        assert!(analyze_document(&d).is_empty());
    }

    #[test]
    fn indentation_jumps_fire_signature_mismatch() {
        // Seven jumps of more than 8 characters between consecutive lines
        let mut lines = Vec::new();
        for i in 0..8 {
            let indent = if i % 2 == 0 { 0 } else { 12 };
            lines.push(format!("{}line {}", " ".repeat(indent), i));
        }
        let d = doc(&lines.join("\n"));
        let patterns = analyze_document(&d);
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].kind, PatternKind::SignatureMismatch);
        assert_eq!(patterns[0].confidence, 60);
    }

    #[test]
    fn four_distinct_dates_fire_timestamp_manipulation() {
        let d = doc(
            "Filed 01/02/2024, amended 01/03/2024, reviewed 01/04/2024, closed 01/05/2024.",
        );
        let patterns = analyze_document(&d);
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].kind, PatternKind::TimestampManipulation);
        assert_eq!(patterns[0].confidence, 75);
        assert_eq!(patterns[0].evidence.len(), 4);
    }

    #[test]
    fn three_distinct_dates_do_not_fire() {
        let d = doc("Filed 01/02/2024, amended 01/03/2024, closed 01/05/2024.");
        assert!(analyze_document(&d).is_empty());
    }

    #[test]
    fn checks_are_additive() {
        let mut lines = vec![
            "Dates: 01/02/2024 01/03/2024 01/04/2024 01/05/2024 [REDACTED]".to_string(),
        ];
        for i in 0..8 {
            let indent = if i % 2 == 0 { 0 } else { 12 };
            lines.push(format!("{}line {}", " ".repeat(indent), i));
        }
        let d = doc(&lines.join("\n"));
        let patterns = analyze_document(&d);
        assert_eq!(patterns.len(), 3);
    }
}
