//! Subcommands and the setup they share.

pub mod batch;
pub mod config;
pub mod counties;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::Context;
use rust_decimal::Decimal;
use tracing::{debug, info};

use deedcheck_core::models::config::DeedCheckConfig;
use deedcheck_core::{County, DeedExtractor, JsonDeedExtractor, LabeledTextExtractor};

/// How raw input is turned into deed fields.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ExtractorKind {
    /// "Label: value" recording sheet text
    Labeled,
    /// JSON object with the deed field set
    Json,
}

impl ExtractorKind {
    pub fn build(self) -> Box<dyn DeedExtractor> {
        match self {
            ExtractorKind::Labeled => Box::new(LabeledTextExtractor::new()),
            ExtractorKind::Json => Box::new(JsonDeedExtractor::new()),
        }
    }
}

/// Rule overrides accepted by the validating commands.
#[derive(clap::Args, Debug, Default)]
pub struct RuleOverrides {
    /// County reference table (JSON); defaults to the built-in table
    #[arg(long)]
    pub counties: Option<PathBuf>,

    /// Allowed numeric vs written amount discrepancy
    #[arg(long)]
    pub tolerance: Option<Decimal>,

    /// Minimum county match confidence (0.0 - 1.0)
    #[arg(long)]
    pub threshold: Option<f64>,
}

impl RuleOverrides {
    pub fn apply(&self, config: &mut DeedCheckConfig) {
        if let Some(path) = &self.counties {
            config.reference.counties_file = Some(path.clone());
        }
        if let Some(tolerance) = self.tolerance {
            config.validation.money_tolerance = tolerance;
        }
        if let Some(threshold) = self.threshold {
            config.validation.county_match_threshold = threshold;
        }
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("deedcheck")
        .join("config.json")
}

/// Load the explicit config file, else the default one if present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<DeedCheckConfig> {
    let config = match config_path {
        Some(path) => DeedCheckConfig::from_file(Path::new(path))
            .with_context(|| format!("failed to load config from {path}"))?,
        None => {
            let default_path = default_config_path();
            if default_path.exists() {
                debug!("Using config at {}", default_path.display());
                DeedCheckConfig::from_file(&default_path)?
            } else {
                DeedCheckConfig::default()
            }
        }
    };

    Ok(config)
}

/// Load the county table. Any failure here is fatal for the whole run.
pub fn load_reference(config: &DeedCheckConfig) -> anyhow::Result<Vec<County>> {
    let counties = deedcheck_core::load_reference(&config.reference)
        .context("failed to load county reference data")?;

    info!("Using {} reference counties", counties.len());
    Ok(counties)
}
