//! Error types for the deedcheck-core library.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the deedcheck library.
#[derive(Error, Debug)]
pub enum DeedError {
    /// Field extraction failed.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// County reference data could not be loaded.
    #[error("reference data error: {0}")]
    Reference(#[from] ReferenceError),

    /// County name could not be resolved.
    #[error(transparent)]
    CountyMatch(#[from] CountyMatchError),

    /// One or more business rules failed.
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Arithmetic overflow in a derived amount.
    #[error("arithmetic overflow: {0}")]
    Overflow(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by the extraction collaborator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    /// One or more required fields are absent.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingField(Vec<String>),

    /// A field was present but its value could not be read.
    #[error("failed to parse {field}: {value}")]
    Parse { field: String, value: String },

    /// The extraction payload itself is unusable.
    #[error("malformed extraction payload: {0}")]
    Malformed(String),

    /// No deed data found in the input.
    #[error("no deed data found")]
    NoData,
}

/// Errors loading the county reference table.
#[derive(Error, Debug)]
pub enum ReferenceError {
    /// The reference file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The reference file is not a valid county list.
    #[error("invalid county data: {0}")]
    Parse(#[from] serde_json::Error),

    /// The reference table has no counties.
    #[error("county reference table is empty")]
    Empty,

    /// A county carries an impossible tax rate.
    #[error("county '{name}' has invalid tax rate {rate}")]
    InvalidTaxRate { name: String, rate: rust_decimal::Decimal },
}

/// Failure to turn a written amount into a number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    /// Nothing left to parse after normalization.
    #[error("empty money text")]
    Empty,

    /// A token that is not a number word, scale word, "and" or "a".
    #[error("unknown word in money text: '{0}'")]
    UnknownWord(String),

    /// The phrase describes an amount too large to represent.
    #[error("amount in words is too large: '{0}'")]
    Overflow(String),
}

/// A date string that matched none of the accepted formats.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid date format: '{input}'. Expected YYYY-MM-DD, MM/DD/YYYY, DD/MM/YYYY or YYYY/MM/DD")]
pub struct DateParseError {
    pub input: String,
}

/// A raw county name that could not be mapped to any reference county.
#[derive(Error, Debug, Clone, PartialEq)]
#[error(
    "could not match county '{raw}' to any known county \
     (normalized: '{normalized}', expanded: '{expanded}', available: [{}], confidence threshold: {threshold})",
    .candidates.join(", ")
)]
pub struct CountyMatchError {
    pub raw: String,
    pub normalized: String,
    pub expanded: String,
    pub candidates: Vec<String>,
    pub threshold: f64,
}

/// Category of a reported failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidDateSequence,
    AmountMismatch,
    CountyMatch,
    Extraction,
    MissingField,
    /// Anything outside the taxonomy above.
    Unexpected,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidDateSequence => "InvalidDateSequence",
            ErrorKind::AmountMismatch => "AmountMismatch",
            ErrorKind::CountyMatch => "CountyMatch",
            ErrorKind::Extraction => "Extraction",
            ErrorKind::MissingField => "MissingField",
            ErrorKind::Unexpected => "Unexpected",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single reported failure.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct ValidationError {
    /// Failure category.
    pub kind: ErrorKind,

    /// Human-readable description.
    pub message: String,

    /// Name of the field that failed, when one can be named.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ValidationError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

impl From<CountyMatchError> for ValidationError {
    fn from(err: CountyMatchError) -> Self {
        ValidationError::new(ErrorKind::CountyMatch, err.to_string()).with_field("county_raw")
    }
}

impl From<ExtractionError> for ValidationError {
    fn from(err: ExtractionError) -> Self {
        match &err {
            ExtractionError::MissingField(fields) => {
                let error = ValidationError::new(ErrorKind::MissingField, err.to_string());
                match fields.as_slice() {
                    [single] => error.with_field(single.clone()),
                    _ => error,
                }
            }
            ExtractionError::Parse { field, .. } => {
                let field = field.clone();
                ValidationError::new(ErrorKind::Extraction, err.to_string()).with_field(field)
            }
            ExtractionError::Malformed(_) | ExtractionError::NoData => {
                ValidationError::new(ErrorKind::Extraction, err.to_string())
            }
        }
    }
}

/// Outcome of a rule run that did not pass.
///
/// A run with one failing rule reports it as-is; a run with several keeps
/// every failure in check order.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationFailure {
    #[error(transparent)]
    Single(ValidationError),

    #[error("found {} validation errors", .0.len())]
    Multiple(Vec<ValidationError>),
}

impl ValidationFailure {
    /// Build the failure for a list of collected errors, or `None` if empty.
    pub fn from_errors(mut errors: Vec<ValidationError>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.pop().map(ValidationFailure::Single),
            _ => Some(ValidationFailure::Multiple(errors)),
        }
    }

    /// Every individual failure, in check order.
    pub fn errors(&self) -> &[ValidationError] {
        match self {
            ValidationFailure::Single(error) => std::slice::from_ref(error),
            ValidationFailure::Multiple(errors) => errors,
        }
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        match self {
            ValidationFailure::Single(error) => vec![error],
            ValidationFailure::Multiple(errors) => errors,
        }
    }
}

/// Result type for the deedcheck library.
pub type Result<T> = std::result::Result<T, DeedError>;
