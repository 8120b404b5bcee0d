//! Core library for validating deed documents produced from OCR'd scans.
//!
//! This crate provides:
//! - Extraction collaborators turning OCR text into raw deed fields
//! - County name normalization and fuzzy resolution to a tax rate
//! - Deterministic business rules (date ordering, numeric vs written amounts)
//! - A pipeline producing one `ValidationResult` per document

pub mod county;
pub mod error;
pub mod extract;
pub mod models;
pub mod pipeline;
pub mod rules;
pub mod text;

pub use county::{
    embedded_counties, enrich_with_county, load_counties, load_reference, resolve_county,
};
pub use error::{
    CountyMatchError, DeedError, ErrorKind, ExtractionError, Result, ValidationError,
    ValidationFailure,
};
pub use extract::{DeedExtractor, JsonDeedExtractor, LabeledTextExtractor};
pub use models::config::DeedCheckConfig;
pub use models::deed::{County, CountyMatch, EnrichedDeed, ExtractedDeed, ValidationResult};
pub use pipeline::DeedPipeline;
pub use rules::{parse_money_words, validate_deed, RuleEngine};
