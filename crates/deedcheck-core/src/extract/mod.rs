//! Extraction collaborators: turning OCR text into raw deed fields.
//!
//! Extractors return values verbatim. They never validate or correct
//! anything; that is the job of the county resolver and the rule engine.

mod json;
mod labeled;
pub mod patterns;

pub use json::JsonDeedExtractor;
pub use labeled::LabeledTextExtractor;

use crate::error::ExtractionError;
use crate::models::deed::ExtractedDeed;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for deed field extractors.
pub trait DeedExtractor: Send + Sync {
    /// Extract the fixed deed field set from raw text.
    fn extract(&self, raw_text: &str) -> Result<ExtractedDeed>;
}

impl<T: DeedExtractor + ?Sized> DeedExtractor for Box<T> {
    fn extract(&self, raw_text: &str) -> Result<ExtractedDeed> {
        (**self).extract(raw_text)
    }
}

/// Parse a numeric amount such as "$1,250,000.00".
pub(crate) fn parse_amount(field: &str, value: &str) -> Result<rust_decimal::Decimal> {
    let cleaned: String = value
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| !matches!(c, ',' | ' ' | '\u{00a0}'))
        .collect();

    cleaned.parse().map_err(|_| ExtractionError::Parse {
        field: field.to_string(),
        value: value.to_string(),
    })
}
