//! Document snapshot received from the external document store.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Immutable snapshot of one document version, as supplied by the
/// document store at the start of an analysis run.
///
/// `text` may be absent (e.g. extraction failed upstream); the engine
/// then skips text-dependent checks but the document still
/// participates in structural metadata such as version counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Stable document identifier.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Extracted text content, if available.
    pub text: Option<String>,
    /// Upload timestamp. Cross-document comparison groups documents
    /// by the calendar date of this field.
    pub uploaded_at: DateTime<Utc>,
    /// Last-modified timestamp.
    pub modified_at: DateTime<Utc>,
    /// Version counter maintained by the document store.
    pub version: u32,
}

impl DocumentRecord {
    /// Calendar date of upload, used for same-day pair grouping.
    pub fn upload_day(&self) -> NaiveDate {
        self.uploaded_at.date_naive()
    }

    /// Text content, or the empty string when absent.
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn upload_day_drops_time_of_day() {
        let doc = DocumentRecord {
            id: "doc-1".to_string(),
            title: "Incident Report".to_string(),
            text: None,
            uploaded_at: Utc.with_ymd_and_hms(2024, 3, 14, 23, 59, 1).unwrap(),
            modified_at: Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 2).unwrap(),
            version: 1,
        };
        assert_eq!(
            doc.upload_day(),
            NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
        );
    }
}
