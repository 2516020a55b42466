//! Fingerprint extraction: structural/statistical document summaries.

pub mod extractor;
pub mod normalize;
pub mod vocabulary;

pub use extractor::{extract_fingerprint, DocumentFingerprint};
pub use normalize::{content_hash, normalize_text};
