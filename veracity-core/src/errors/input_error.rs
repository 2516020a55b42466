//! Document input errors.

/// Errors for unreadable or degraded document input. Recovered
/// locally: the affected document contributes no patterns and a
/// per-document note is recorded on the run.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("document {id} has no text content")]
    MissingText { id: String },

    #[error("document {id} is empty after normalization")]
    EmptyDocument { id: String },

    #[error("analysis of document {id} faulted, document skipped")]
    AnalysisFaulted { id: String },

    #[error("failed to read document snapshot {path}: {message}")]
    SnapshotUnreadable { path: String, message: String },
}
