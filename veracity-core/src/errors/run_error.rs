//! Run-level failures.

/// Errors that mark an entire analysis run as failed. The previous
/// committed run remains authoritative; a failed run never erases
/// externally visible state.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("no documents in snapshot, nothing to analyze")]
    NoDocuments,

    #[error("run produced no result: {reason}")]
    NoOutput { reason: String },

    #[error("failed to persist artifact {path}: {message}")]
    ArtifactWrite { path: String, message: String },
}
