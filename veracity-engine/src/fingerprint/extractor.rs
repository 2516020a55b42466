//! Fingerprint extraction from raw document text.
//!
//! Extraction never fails: empty or malformed text degrades to empty
//! collections, and the fingerprint still carries the title label.

use std::collections::{BTreeMap, BTreeSet};

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use super::normalize::{content_hash, normalize_text};
use super::vocabulary::{
    EVIDENCE_ID_PATTERNS, KEY_PHRASES, KEY_PHRASE_MATCHER, MONITORED_NAME_PATTERNS,
    STRUCTURAL_MARKER_PATTERNS, TIMESTAMP_PATTERNS,
};

/// Minimum recurrences for an n-gram to be promoted to a key phrase.
const NGRAM_MIN_OCCURRENCES: usize = 3;
/// Minimum length (chars) for a promoted n-gram.
const NGRAM_MIN_LEN: usize = 7;
/// Number of sentence openings sampled per document.
const SENTENCE_SAMPLE: usize = 5;
/// Words kept from each sampled sentence opening.
const OPENING_WORDS: usize = 3;

/// Derived structural/statistical summary of one document version.
///
/// Determinism invariant: two fingerprints built from byte-identical
/// normalized text always produce an identical `content_hash`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentFingerprint {
    /// Source document title label.
    pub title: String,
    /// Matched vocabulary terms plus promoted recurring n-grams, in
    /// first-occurrence order, deduplicated.
    pub key_phrases: Vec<String>,
    /// Lines matching a structural-marker family, in document order,
    /// deduplicated.
    pub structural_markers: Vec<String>,
    /// Monitored name → occurrence count. Every roster entry is
    /// present; absence records zero.
    pub name_counts: BTreeMap<String, u32>,
    /// Deduplicated evidence/case identifiers, order not significant.
    pub evidence_ids: BTreeSet<String>,
    /// Deduplicated extracted timestamp strings.
    pub timestamps: BTreeSet<String>,
    /// Order-sensitive hash over whitespace-collapsed, lower-cased text.
    pub content_hash: u64,
    pub paragraph_count: usize,
    /// Normalized openings of the first few sentences.
    pub sentence_openings: Vec<String>,
}

/// Build a fingerprint from raw text and a title label.
pub fn extract_fingerprint(text: &str, title: &str) -> DocumentFingerprint {
    let normalized = normalize_text(text);

    DocumentFingerprint {
        title: title.to_string(),
        key_phrases: extract_key_phrases(&normalized),
        structural_markers: extract_structural_markers(text),
        name_counts: count_monitored_names(text),
        evidence_ids: extract_evidence_ids(text),
        timestamps: extract_timestamps(text),
        content_hash: content_hash(text),
        paragraph_count: count_paragraphs(text),
        sentence_openings: sample_sentence_openings(&normalized),
    }
}

/// Vocabulary hits in first-occurrence order, then recurring 2- and
/// 3-word n-grams promoted on frequency.
fn extract_key_phrases(normalized: &str) -> Vec<String> {
    let mut phrases = Vec::new();
    let mut seen: FxHashSet<usize> = FxHashSet::default();
    for mat in KEY_PHRASE_MATCHER.find_iter(normalized) {
        let idx = mat.pattern().as_usize();
        if seen.insert(idx) {
            phrases.push(KEY_PHRASES[idx].to_string());
        }
    }

    let vocab: FxHashSet<&str> = KEY_PHRASES.iter().copied().collect();
    for ngram in promoted_ngrams(normalized) {
        if !vocab.contains(ngram.as_str()) {
            phrases.push(ngram);
        }
    }
    phrases
}

/// Lowercase alphabetic 2-/3-grams recurring at least
/// `NGRAM_MIN_OCCURRENCES` times and longer than 6 characters,
/// ordered by first occurrence.
fn promoted_ngrams(normalized: &str) -> Vec<String> {
    let words: Vec<&str> = normalized
        .split(' ')
        .filter(|w| !w.is_empty() && w.chars().all(|c| c.is_ascii_lowercase()))
        .collect();

    let mut counts: FxHashMap<String, (usize, usize)> = FxHashMap::default();
    let mut position = 0usize;
    for n in 2..=3 {
        for window in words.windows(n) {
            let phrase = window.join(" ");
            let entry = counts.entry(phrase).or_insert((0, position));
            entry.0 += 1;
            position += 1;
        }
    }

    let mut qualified: Vec<(usize, String)> = counts
        .into_iter()
        .filter(|(phrase, (count, _))| {
            *count >= NGRAM_MIN_OCCURRENCES && phrase.len() >= NGRAM_MIN_LEN
        })
        .map(|(phrase, (_, first))| (first, phrase))
        .collect();
    qualified.sort();
    qualified.into_iter().map(|(_, phrase)| phrase).collect()
}

fn extract_structural_markers(text: &str) -> Vec<String> {
    let mut markers = Vec::new();
    let mut seen: FxHashSet<String> = FxHashSet::default();
    for line in text.lines() {
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            continue;
        }
        if STRUCTURAL_MARKER_PATTERNS.iter().any(|re| re.is_match(trimmed)) {
            let marker = trimmed.trim_start().to_string();
            if seen.insert(marker.clone()) {
                markers.push(marker);
            }
        }
    }
    markers
}

fn count_monitored_names(text: &str) -> BTreeMap<String, u32> {
    MONITORED_NAME_PATTERNS
        .iter()
        .map(|(name, re)| (name.to_string(), re.find_iter(text).count() as u32))
        .collect()
}

fn extract_evidence_ids(text: &str) -> BTreeSet<String> {
    let mut ids = BTreeSet::new();
    for re in EVIDENCE_ID_PATTERNS.iter() {
        for caps in re.captures_iter(text) {
            let matched = caps
                .get(1)
                .or_else(|| caps.get(0))
                .map(|m| m.as_str().to_uppercase());
            if let Some(id) = matched {
                ids.insert(id);
            }
        }
    }
    ids
}

fn extract_timestamps(text: &str) -> BTreeSet<String> {
    let mut timestamps = BTreeSet::new();
    for re in TIMESTAMP_PATTERNS.iter() {
        for mat in re.find_iter(text) {
            timestamps.insert(mat.as_str().to_string());
        }
    }
    timestamps
}

fn count_paragraphs(text: &str) -> usize {
    text.split("\n\n")
        .flat_map(|block| block.split("\r\n\r\n"))
        .filter(|block| !block.trim().is_empty())
        .count()
}

fn sample_sentence_openings(normalized: &str) -> Vec<String> {
    normalized
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(SENTENCE_SAMPLE)
        .map(|sentence| {
            sentence
                .split(' ')
                .take(OPENING_WORDS)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_degrades_to_empty_collections() {
        let fp = extract_fingerprint("", "Empty Doc");
        assert_eq!(fp.title, "Empty Doc");
        assert!(fp.key_phrases.is_empty());
        assert!(fp.structural_markers.is_empty());
        assert!(fp.evidence_ids.is_empty());
        assert!(fp.timestamps.is_empty());
        assert_eq!(fp.paragraph_count, 0);
        assert!(fp.sentence_openings.is_empty());
        // Roster keys present even with no text
        assert_eq!(fp.name_counts.len(), super::super::vocabulary::MONITORED_NAMES.len());
        assert!(fp.name_counts.values().all(|&c| c == 0));
    }

    #[test]
    fn vocabulary_phrases_found_case_insensitively() {
        let fp = extract_fingerprint(
            "The CHAIN OF CUSTODY was broken. See the witness statement.",
            "doc",
        );
        assert!(fp.key_phrases.contains(&"chain of custody".to_string()));
        assert!(fp.key_phrases.contains(&"witness statement".to_string()));
    }

    #[test]
    fn recurring_ngrams_are_promoted() {
        let text = "the missing ledger was cited. the missing ledger appeared again. \
                    the missing ledger was never found.";
        let fp = extract_fingerprint(text, "doc");
        assert!(fp.key_phrases.iter().any(|p| p == "missing ledger"));
        // A phrase occurring twice is not promoted
        assert!(!fp.key_phrases.iter().any(|p| p == "never found"));
    }

    #[test]
    fn name_counts_use_word_boundaries() {
        let text = "Noel met Noelle. Later, noel signed the log.";
        let fp = extract_fingerprint(text, "doc");
        assert_eq!(fp.name_counts["Noel"], 2);
    }

    #[test]
    fn evidence_ids_deduplicate_across_families() {
        let text = "Evidence item EV-1421 stored. Badge #4471 present. \
                    The tag ev-1421 appears twice. Case No: 24-CR-0112.";
        let fp = extract_fingerprint(text, "doc");
        assert!(fp.evidence_ids.contains("EV-1421"));
        assert!(fp.evidence_ids.contains("4471"));
        assert!(fp.evidence_ids.contains("24-CR-0112"));
    }

    #[test]
    fn timestamps_extracted_and_deduplicated() {
        let text = "Filed 03/14/2024 at 11:45 PM, amended March 15, 2024. Again: 03/14/2024.";
        let fp = extract_fingerprint(text, "doc");
        assert!(fp.timestamps.contains("03/14/2024"));
        assert!(fp.timestamps.contains("11:45 PM"));
        assert!(fp.timestamps.contains("March 15, 2024"));
        assert_eq!(
            fp.timestamps.iter().filter(|t| t.as_str() == "03/14/2024").count(),
            1
        );
    }

    #[test]
    fn content_hash_matches_normalized_text() {
        let text = "INCIDENT  Report\nfiled late";
        let fp_raw = extract_fingerprint(text, "doc");
        let fp_norm = extract_fingerprint(&normalize_text(text), "doc");
        assert_eq!(fp_raw.content_hash, fp_norm.content_hash);
    }

    #[test]
    fn paragraphs_counted_on_blank_lines() {
        let text = "First paragraph.\n\nSecond paragraph.\n\n\nThird.";
        assert_eq!(extract_fingerprint(text, "doc").paragraph_count, 3);
    }

    #[test]
    fn sentence_openings_sampled_and_truncated() {
        let text = "The officer arrived on scene quickly. Nothing was touched. Done.";
        let fp = extract_fingerprint(text, "doc");
        assert_eq!(fp.sentence_openings[0], "the officer arrived");
        assert_eq!(fp.sentence_openings[1], "nothing was touched");
        assert_eq!(fp.sentence_openings[2], "done");
    }
}
