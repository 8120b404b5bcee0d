//! Runs every deed rule and reports all failures together.

use rust_decimal::Decimal;
use tracing::debug;

use super::amounts::{validate_amount_consistency, DEFAULT_TOLERANCE};
use super::dates::validate_date_sequence;
use crate::error::{ValidationError, ValidationFailure};

/// Deterministic business-rule checks for a deed.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    tolerance: Decimal,
}

impl RuleEngine {
    /// Create an engine with the default one-unit amount tolerance.
    pub fn new() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Set the allowed numeric vs written amount discrepancy.
    pub fn with_tolerance(mut self, tolerance: Decimal) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn tolerance(&self) -> Decimal {
        self.tolerance
    }

    /// Run the date check, then the amount check, regardless of either outcome.
    pub fn validate(
        &self,
        date_signed: &str,
        date_recorded: &str,
        amount_numeric: Decimal,
        amount_words: &str,
    ) -> Result<(), ValidationFailure> {
        let checks = [
            validate_date_sequence(date_signed, date_recorded),
            validate_amount_consistency(amount_numeric, amount_words, self.tolerance),
        ];

        let errors: Vec<ValidationError> = checks.into_iter().filter_map(Result::err).collect();
        debug!("Rule checks finished with {} failure(s)", errors.len());

        match ValidationFailure::from_errors(errors) {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate a deed with the default tolerance.
pub fn validate_deed(
    date_signed: &str,
    date_recorded: &str,
    amount_numeric: Decimal,
    amount_words: &str,
) -> Result<(), ValidationFailure> {
    RuleEngine::new().validate(date_signed, date_recorded, amount_numeric, amount_words)
}
