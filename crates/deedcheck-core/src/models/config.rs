//! Configuration structures for the validation pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{DeedError, Result};

/// Main configuration for deedcheck.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeedCheckConfig {
    /// Business-rule settings.
    pub validation: ValidationConfig,

    /// County reference data settings.
    pub reference: ReferenceConfig,

    /// Result rendering settings.
    pub output: OutputConfig,
}

/// Business-rule configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Maximum allowed difference between numeric and written amounts.
    pub money_tolerance: Decimal,

    /// Minimum similarity (0.0 - 1.0) for a fuzzy county match.
    pub county_match_threshold: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            money_tolerance: Decimal::ONE,
            county_match_threshold: 0.8,
        }
    }
}

/// County reference data configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    /// JSON file with the county table. The built-in table is used when unset.
    pub counties_file: Option<PathBuf>,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON results.
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty_json: true }
    }
}

impl DeedCheckConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        let threshold = self.validation.county_match_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(DeedError::Config(format!(
                "county_match_threshold must be between 0 and 1, got {threshold}"
            )));
        }

        if self.validation.money_tolerance.is_sign_negative() {
            return Err(DeedError::Config(format!(
                "money_tolerance must not be negative, got {}",
                self.validation.money_tolerance
            )));
        }

        Ok(())
    }
}
