//! Integrity detectors: single-document scans and cross-document
//! comparison, driven by the rule table in [`rules`].

pub mod cross_doc;
pub mod intra_doc;
pub mod rules;

pub use cross_doc::{compare_documents, compare_pair};
pub use intra_doc::analyze_document;
