//! Text normalization and content hashing via xxh3.

use xxhash_rust::xxh3::xxh3_64;

/// Lower-case the text and collapse every whitespace run to a single
/// space. Two texts differing only in whitespace or case normalize to
/// identical strings.
pub fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_whitespace = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            in_whitespace = true;
            continue;
        }
        if in_whitespace && !out.is_empty() {
            out.push(' ');
        }
        in_whitespace = false;
        for lower in ch.to_lowercase() {
            out.push(lower);
        }
    }
    out
}

/// Order-sensitive content hash over normalized text.
#[inline]
pub fn content_hash(text: &str) -> u64 {
    xxh3_64(normalize_text(text).as_bytes())
}
