//! Error handling for Veracity.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod engine_error;
pub mod input_error;
pub mod run_error;
pub mod scoring_error;

pub use config_error::ConfigError;
pub use engine_error::{EngineError, RunResult};
pub use input_error::InputError;
pub use run_error::RunError;
pub use scoring_error::ScoringError;
