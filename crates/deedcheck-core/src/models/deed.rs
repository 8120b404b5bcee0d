//! Deed data models from extraction through the final validation result.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Names of the fields every extraction must produce, in schema order.
pub const REQUIRED_FIELDS: &[&str] = &[
    "doc",
    "county_raw",
    "state",
    "date_signed",
    "date_recorded",
    "grantor",
    "grantee",
    "amount_numeric",
    "amount_words",
    "apn",
    "status",
];

/// A county with its transfer tax rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct County {
    /// Official county name.
    pub name: String,

    /// Tax rate as a fraction (0.012 for 1.2%).
    pub tax_rate: Decimal,
}

impl County {
    pub fn new(name: impl Into<String>, tax_rate: Decimal) -> Self {
        Self {
            name: name.into(),
            tax_rate,
        }
    }
}

/// Deed fields exactly as the extraction collaborator returned them.
///
/// Nothing here is validated or corrected; implausible values are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedDeed {
    /// Document number (e.g. DEED-TRUST-0042).
    pub doc: String,

    /// County name as it appears in the OCR text.
    pub county_raw: String,

    /// State code.
    pub state: String,

    /// Date the deed was signed.
    pub date_signed: String,

    /// Date the deed was recorded.
    pub date_recorded: String,

    /// Party transferring the property.
    pub grantor: String,

    /// Party receiving the property.
    pub grantee: String,

    /// Transaction amount as a number.
    pub amount_numeric: Decimal,

    /// Transaction amount written in words.
    pub amount_words: String,

    /// Assessor's Parcel Number.
    pub apn: String,

    /// Document status (e.g. PRELIMINARY, FINAL).
    pub status: String,
}

/// Result of resolving a raw county name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountyMatch {
    /// Canonical county name.
    pub name: String,

    /// The county's tax rate.
    pub tax_rate: Decimal,

    /// Match confidence in `[0, 1]`; exactly 1.0 for exact matches.
    pub confidence: f64,
}

/// An extracted deed with its county resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedDeed {
    #[serde(flatten)]
    pub extracted: ExtractedDeed,

    /// Standardized county name.
    pub county_canonical: String,

    /// County tax rate.
    pub tax_rate: Decimal,

    /// Confidence of the county match.
    pub match_confidence: f64,
}

impl EnrichedDeed {
    pub fn new(extracted: ExtractedDeed, county: CountyMatch) -> Self {
        Self {
            extracted,
            county_canonical: county.name,
            tax_rate: county.tax_rate,
            match_confidence: county.confidence,
        }
    }
}

/// Final outcome for one document.
///
/// `deed` and `closing_cost` are present exactly when the document passed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    passed: bool,
    deed: Option<EnrichedDeed>,
    closing_cost: Option<Decimal>,
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// A passing result.
    pub fn passed(deed: EnrichedDeed, closing_cost: Decimal) -> Self {
        Self {
            passed: true,
            deed: Some(deed),
            closing_cost: Some(closing_cost),
            errors: Vec::new(),
        }
    }

    /// A failing result. An empty error list is not a failure, so callers
    /// must supply at least one error.
    pub fn failed(errors: Vec<ValidationError>) -> Self {
        debug_assert!(!errors.is_empty(), "failed result without errors");
        Self {
            passed: false,
            deed: None,
            closing_cost: None,
            errors,
        }
    }

    pub fn is_passed(&self) -> bool {
        self.passed
    }

    pub fn deed(&self) -> Option<&EnrichedDeed> {
        self.deed.as_ref()
    }

    pub fn closing_cost(&self) -> Option<Decimal> {
        self.closing_cost
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }
}
