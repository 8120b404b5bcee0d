//! Numeric vs written amount consistency.

use rust_decimal::Decimal;

use super::money_words::{format_money, parse_money_words};
use crate::error::{ErrorKind, ValidationError};

/// Default allowed discrepancy, one currency unit.
pub const DEFAULT_TOLERANCE: Decimal = Decimal::ONE;

/// Check that the numeric amount agrees with the written one.
///
/// A written amount that cannot be parsed counts as a mismatch.
pub fn validate_amount_consistency(
    amount_numeric: Decimal,
    amount_words: &str,
    tolerance: Decimal,
) -> Result<(), ValidationError> {
    let parsed = parse_money_words(amount_words).map_err(|err| {
        ValidationError::new(
            ErrorKind::AmountMismatch,
            format!("could not parse amount in words: {err}"),
        )
        .with_field("amount_words")
    })?;

    let discrepancy = (amount_numeric - parsed).abs();
    if discrepancy > tolerance {
        return Err(ValidationError::new(
            ErrorKind::AmountMismatch,
            format!(
                "amount discrepancy detected: numeric {} vs words {} \
                 (discrepancy {}, tolerance {})",
                format_money(amount_numeric),
                format_money(parsed),
                format_money(discrepancy),
                format_money(tolerance),
            ),
        )
        .with_field("amount_numeric"));
    }

    Ok(())
}
