//! Versioned rule-weights configuration.
//!
//! The backing file is TOML with a `version` string and a `weights`
//! table of category → (rule name → weight in [0, 1]).
//! `confidence_thresholds` is itself a category whose four entries
//! must be monotonically non-increasing. Unknown categories are
//! preserved but unused. A config that fails validation is rejected
//! whole, never merged.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Required weight categories. Any category missing from a loaded
/// file is filled from compiled defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightCategory {
    LegalViolations,
    DocumentIntegrity,
    PatternAnalysis,
    ConfidenceThresholds,
}

impl WeightCategory {
    pub const REQUIRED: [WeightCategory; 4] = [
        Self::LegalViolations,
        Self::DocumentIntegrity,
        Self::PatternAnalysis,
        Self::ConfidenceThresholds,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LegalViolations => "legal_violations",
            Self::DocumentIntegrity => "document_integrity",
            Self::PatternAnalysis => "pattern_analysis",
            Self::ConfidenceThresholds => "confidence_thresholds",
        }
    }
}

/// Typed view of the `confidence_thresholds` category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceThresholds {
    pub critical: f64,
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            critical: 0.90,
            high: 0.75,
            medium: 0.50,
            low: 0.25,
        }
    }
}

/// Versioned mapping of weight category → (rule name → weight).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleWeightsConfig {
    pub version: String,
    pub updated_at: Option<String>,
    pub updated_by: Option<String>,
    /// Category → (name → weight). All values must lie in [0, 1].
    pub weights: BTreeMap<String, BTreeMap<String, f64>>,
}

impl Default for RuleWeightsConfig {
    fn default() -> Self {
        Self::builtin_defaults()
    }
}

impl RuleWeightsConfig {
    /// Compiled default weights. The individual values are tunable
    /// operating points, not derived constants; operators override
    /// them through the weights file.
    pub fn builtin_defaults() -> Self {
        let mut weights = BTreeMap::new();

        weights.insert(
            WeightCategory::LegalViolations.as_str().to_string(),
            BTreeMap::from([
                ("evidence_tampering".to_string(), 0.95),
                ("chain_of_custody_break".to_string(), 0.85),
                ("brady_violation".to_string(), 0.90),
                ("witness_intimidation".to_string(), 0.90),
                ("perjury_indicator".to_string(), 0.80),
            ]),
        );
        weights.insert(
            WeightCategory::DocumentIntegrity.as_str().to_string(),
            BTreeMap::from([
                ("signature_mismatch".to_string(), 0.90),
                ("content_insertion".to_string(), 0.85),
                ("redaction_traces".to_string(), 0.80),
                ("timestamp_manipulation".to_string(), 0.90),
            ]),
        );
        // Only names the scoring engine can resolve; an entry no
        // pattern kind maps to would be dead configuration.
        weights.insert(
            WeightCategory::PatternAnalysis.as_str().to_string(),
            BTreeMap::from([("cross_reference_break".to_string(), 0.80)]),
        );

        let t = ConfidenceThresholds::default();
        weights.insert(
            WeightCategory::ConfidenceThresholds.as_str().to_string(),
            BTreeMap::from([
                ("critical".to_string(), t.critical),
                ("high".to_string(), t.high),
                ("medium".to_string(), t.medium),
                ("low".to_string(), t.low),
            ]),
        );

        Self {
            version: "builtin-defaults".to_string(),
            updated_at: None,
            updated_by: None,
            weights,
        }
    }

    /// Parse a TOML string, fill missing required categories from
    /// defaults, and validate. `path` labels error messages only.
    pub fn from_toml_str(toml_str: &str, path: &str) -> Result<Self, ConfigError> {
        let mut config: RuleWeightsConfig =
            toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
                path: path.to_string(),
                message: e.to_string(),
            })?;
        config.fill_missing_categories();
        config.validate()?;
        Ok(config)
    }

    /// Load and resolve a weights file from disk. A missing file and
    /// an unreadable one are distinct failures; only the former means
    /// "no config supplied".
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                ConfigError::Unreadable {
                    path: path.display().to_string(),
                    message: e.to_string(),
                }
            }
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Fill any missing required category from compiled defaults.
    /// Individual missing `confidence_thresholds` keys are also
    /// filled; present keys are never overwritten.
    pub fn fill_missing_categories(&mut self) {
        let defaults = Self::builtin_defaults();
        for category in WeightCategory::REQUIRED {
            let name = category.as_str();
            match self.weights.get_mut(name) {
                None => {
                    if let Some(table) = defaults.weights.get(name) {
                        self.weights.insert(name.to_string(), table.clone());
                    }
                }
                Some(table) if category == WeightCategory::ConfidenceThresholds => {
                    for (key, value) in &defaults.weights[name] {
                        table.entry(key.clone()).or_insert(*value);
                    }
                }
                Some(_) => {}
            }
        }
    }

    /// Validate all weight values and threshold monotonicity.
    /// Unknown categories are validated for [0, 1] bounds too.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (category, table) in &self.weights {
            for (name, value) in table {
                if !value.is_finite() || !(0.0..=1.0).contains(value) {
                    return Err(ConfigError::ValidationFailed {
                        field: format!("weights.{category}.{name}"),
                        message: format!("weight {value} must be between 0.0 and 1.0"),
                    });
                }
            }
        }

        let t = self.thresholds();
        if !(t.critical >= t.high && t.high >= t.medium && t.medium >= t.low) {
            return Err(ConfigError::ValidationFailed {
                field: "weights.confidence_thresholds".to_string(),
                message: "thresholds must satisfy critical >= high >= medium >= low"
                    .to_string(),
            });
        }
        Ok(())
    }

    /// Look up a weight by category and rule name.
    pub fn weight_for(&self, category: &str, name: &str) -> Option<f64> {
        self.weights.get(category)?.get(name).copied()
    }

    /// Typed view of the confidence thresholds, defaulting any
    /// missing key.
    pub fn thresholds(&self) -> ConfidenceThresholds {
        let defaults = ConfidenceThresholds::default();
        let table = self
            .weights
            .get(WeightCategory::ConfidenceThresholds.as_str());
        let get = |key: &str, fallback: f64| -> f64 {
            table
                .and_then(|t| t.get(key))
                .copied()
                .unwrap_or(fallback)
        };
        ConfidenceThresholds {
            critical: get("critical", defaults.critical),
            high: get("high", defaults.high),
            medium: get("medium", defaults.medium),
            low: get("low", defaults.low),
        }
    }
}
