//! Rule-weights configuration errors.
//!
//! Config errors are recovered locally: the weights store falls back
//! to the last good snapshot (or compiled defaults) and records a
//! warning. They are never fatal to the host process.

/// Errors from loading or validating a rule-weights configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("weights file not found: {path}")]
    FileNotFound { path: String },

    #[error("failed to read weights file {path}: {message}")]
    Unreadable { path: String, message: String },

    #[error("failed to parse {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("invalid weights config at {field}: {message}")]
    ValidationFailed { field: String, message: String },
}
