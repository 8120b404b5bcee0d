//! Loading the county reference table.

use std::path::Path;

use tracing::info;

use crate::error::ReferenceError;
use crate::models::config::ReferenceConfig;
use crate::models::deed::County;
use crate::models::embedded::COUNTIES_JSON;

/// Parse and check a JSON county table.
pub fn parse_counties(json: &str) -> Result<Vec<County>, ReferenceError> {
    let counties: Vec<County> = serde_json::from_str(json)?;

    if counties.is_empty() {
        return Err(ReferenceError::Empty);
    }

    if let Some(county) = counties.iter().find(|c| c.tax_rate.is_sign_negative()) {
        return Err(ReferenceError::InvalidTaxRate {
            name: county.name.clone(),
            rate: county.tax_rate,
        });
    }

    Ok(counties)
}

/// Load the county table from a JSON file.
pub fn load_counties(path: &Path) -> Result<Vec<County>, ReferenceError> {
    let content = std::fs::read_to_string(path).map_err(|source| ReferenceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let counties = parse_counties(&content)?;
    info!("Loaded {} counties from {}", counties.len(), path.display());
    Ok(counties)
}

/// The county table compiled into the binary.
pub fn embedded_counties() -> Result<Vec<County>, ReferenceError> {
    parse_counties(COUNTIES_JSON)
}

/// The configured county table, or the built-in one when none is set.
pub fn load_reference(config: &ReferenceConfig) -> crate::Result<Vec<County>> {
    let counties = match &config.counties_file {
        Some(path) => load_counties(path)?,
        None => embedded_counties()?,
    };
    Ok(counties)
}
