//! Data models and configuration.

pub mod config;
pub mod deed;
pub mod embedded;

pub use config::DeedCheckConfig;
pub use deed::{County, CountyMatch, EnrichedDeed, ExtractedDeed, ValidationResult, REQUIRED_FIELDS};
