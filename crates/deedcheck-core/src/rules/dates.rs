//! Date parsing and signing/recording order checks.

use chrono::NaiveDate;

use crate::error::{DateParseError, ErrorKind, ValidationError};

/// Accepted formats, tried in order. The first successful parse wins, so an
/// ambiguous `01/02/2024` is read as January 2nd.
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%Y/%m/%d"];

/// Parse a date under any of the accepted formats.
pub fn parse_date(input: &str) -> Result<NaiveDate, DateParseError> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
        .ok_or_else(|| DateParseError {
            input: input.to_string(),
        })
}

/// Signed number of days from `from` to `to`.
pub fn days_between(from: &str, to: &str) -> Result<i64, DateParseError> {
    let from = parse_date(from)?;
    let to = parse_date(to)?;
    Ok((to - from).num_days())
}

/// Check that a deed was not recorded before it was signed.
///
/// Unparseable dates are reported as a sequencing failure too, since the
/// order cannot be established without them.
pub fn validate_date_sequence(date_signed: &str, date_recorded: &str) -> Result<(), ValidationError> {
    let parse = |input: &str, field: &str| {
        parse_date(input).map_err(|err| {
            ValidationError::new(
                ErrorKind::InvalidDateSequence,
                format!("date parsing error: {err}"),
            )
            .with_field(field)
        })
    };

    let signed = parse(date_signed, "date_signed")?;
    let recorded = parse(date_recorded, "date_recorded")?;

    if recorded < signed {
        return Err(ValidationError::new(
            ErrorKind::InvalidDateSequence,
            format!(
                "document cannot be recorded ({date_recorded}) before it was signed ({date_signed})"
            ),
        )
        .with_field("date_recorded"));
    }

    Ok(())
}
