//! Rule-weights configuration: TOML-based, validated, with compiled
//! defaults filling any missing category.

pub mod weights_config;

pub use weights_config::{ConfidenceThresholds, RuleWeightsConfig, WeightCategory};
