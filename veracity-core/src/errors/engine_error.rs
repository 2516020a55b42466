//! Engine-level error aggregate and non-fatal error collection.

use super::{ConfigError, InputError, RunError, ScoringError};

/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("input error: {0}")]
    Input(#[from] InputError),

    #[error("scoring error: {0}")]
    Scoring(#[from] ScoringError),

    #[error("run failure: {0}")]
    Run(#[from] RunError),
}

/// Result of a pipeline stage that accumulates non-fatal errors.
/// A fault against one document or pair is recorded here while the
/// remaining items continue processing.
#[derive(Debug, Default)]
pub struct RunResult<T: Default = ()> {
    /// The successful result data.
    pub data: T,
    /// Non-fatal errors collected during the stage.
    pub errors: Vec<EngineError>,
}

impl<T: Default> RunResult<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: impl Into<EngineError>) {
        self.errors.push(error.into());
    }

    /// True when no non-fatal errors were recorded.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Notes suitable for attaching to an `AnalysisRun`.
    pub fn notes(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_result_collects_errors() {
        let mut result: RunResult<Vec<u32>> = RunResult::new(vec![1, 2]);
        assert!(result.is_clean());
        result.add_error(InputError::MissingText {
            id: "doc-7".to_string(),
        });
        assert!(!result.is_clean());
        assert_eq!(result.notes().len(), 1);
        assert!(result.notes()[0].contains("doc-7"));
    }
}
