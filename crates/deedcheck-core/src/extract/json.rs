//! Extractor for JSON payloads from an external extraction service.

use serde_json::{Map, Value};
use tracing::debug;

use super::{parse_amount, DeedExtractor, Result};
use crate::error::ExtractionError;
use crate::models::deed::{ExtractedDeed, REQUIRED_FIELDS};

/// Reads the fixed deed field set from a JSON object.
///
/// This is the shape a language-model extraction service returns. Strings
/// are taken verbatim; `amount_numeric` may be a number or a numeric string.
#[derive(Debug, Clone, Default)]
pub struct JsonDeedExtractor;

impl JsonDeedExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl DeedExtractor for JsonDeedExtractor {
    fn extract(&self, raw_text: &str) -> Result<ExtractedDeed> {
        let value: Value = serde_json::from_str(raw_text.trim())
            .map_err(|e| ExtractionError::Malformed(format!("invalid JSON: {e}")))?;

        let Value::Object(object) = value else {
            return Err(ExtractionError::Malformed(
                "expected a JSON object with deed fields".to_string(),
            ));
        };

        let missing: Vec<String> = REQUIRED_FIELDS
            .iter()
            .filter(|f| !object.contains_key(**f))
            .map(|f| f.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ExtractionError::MissingField(missing));
        }
        debug!("JSON payload has all {} deed fields", REQUIRED_FIELDS.len());

        let text = |field: &str| string_field(&object, field);

        Ok(ExtractedDeed {
            doc: text("doc")?,
            county_raw: text("county_raw")?,
            state: text("state")?,
            date_signed: text("date_signed")?,
            date_recorded: text("date_recorded")?,
            grantor: text("grantor")?,
            grantee: text("grantee")?,
            amount_numeric: amount_field(&object)?,
            amount_words: text("amount_words")?,
            apn: text("apn")?,
            status: text("status")?,
        })
    }
}

fn string_field(object: &Map<String, Value>, field: &str) -> Result<String> {
    match object.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(ExtractionError::Parse {
            field: field.to_string(),
            value: other.to_string(),
        }),
        None => Err(ExtractionError::MissingField(vec![field.to_string()])),
    }
}

fn amount_field(object: &Map<String, Value>) -> Result<rust_decimal::Decimal> {
    const FIELD: &str = "amount_numeric";
    match object.get(FIELD) {
        Some(Value::Number(n)) => parse_amount(FIELD, &n.to_string()),
        Some(Value::String(s)) => parse_amount(FIELD, s),
        Some(other) => Err(ExtractionError::Parse {
            field: FIELD.to_string(),
            value: other.to_string(),
        }),
        None => Err(ExtractionError::MissingField(vec![FIELD.to_string()])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn payload() -> Value {
        json!({
            "doc": "DEED-TRUST-0042",
            "county_raw": "S. Clara",
            "state": "CA",
            "date_signed": "2024-01-15",
            "date_recorded": "2024-01-10",
            "grantor": "T.E.S.L.A. Holdings LLC",
            "grantee": "John  &  Sarah  Connor",
            "amount_numeric": 1250000.0,
            "amount_words": "One Million Two Hundred Thousand Dollars",
            "apn": "992-001-XA",
            "status": "PRELIMINARY"
        })
    }

    #[test]
    fn test_extract_payload() {
        let deed = JsonDeedExtractor::new().extract(&payload().to_string()).unwrap();
        assert_eq!(deed.doc, "DEED-TRUST-0042");
        assert_eq!(deed.county_raw, "S. Clara");
        assert_eq!(deed.amount_numeric, Decimal::from(1_250_000));
        assert_eq!(deed.grantee, "John  &  Sarah  Connor");
    }

    #[test]
    fn test_amount_as_string() {
        let mut value = payload();
        value["amount_numeric"] = json!("$1,250,000.00");
        let deed = JsonDeedExtractor::new().extract(&value.to_string()).unwrap();
        assert_eq!(deed.amount_numeric, Decimal::from(1_250_000));
    }

    #[test]
    fn test_missing_fields() {
        let mut value = payload();
        let object = value.as_object_mut().unwrap();
        object.remove("apn");
        object.remove("doc");

        let err = JsonDeedExtractor::new().extract(&value.to_string()).unwrap_err();
        assert_eq!(
            err,
            ExtractionError::MissingField(vec!["doc".to_string(), "apn".to_string()])
        );
    }

    #[test]
    fn test_malformed_payloads() {
        let extractor = JsonDeedExtractor::new();
        assert!(matches!(extractor.extract("{not json"), Err(ExtractionError::Malformed(_))));
        assert!(matches!(extractor.extract("[1, 2]"), Err(ExtractionError::Malformed(_))));
    }

    #[test]
    fn test_wrong_field_type() {
        let mut value = payload();
        value["grantor"] = json!(["a", "b"]);
        let err = JsonDeedExtractor::new().extract(&value.to_string()).unwrap_err();
        assert!(matches!(err, ExtractionError::Parse { ref field, .. } if field == "grantor"));
    }
}
