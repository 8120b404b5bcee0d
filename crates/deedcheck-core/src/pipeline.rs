//! One-document validation pipeline.
//!
//! extraction → county enrichment → rule validation → closing cost.

use std::sync::Arc;
use std::time::Instant;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::county::enrich_with_county;
use crate::error::{DeedError, ErrorKind, ValidationError};
use crate::extract::DeedExtractor;
use crate::models::config::ValidationConfig;
use crate::models::deed::{County, EnrichedDeed, ExtractedDeed, ValidationResult};
use crate::rules::RuleEngine;

/// Validates deed documents against a county reference table.
///
/// The pipeline holds no mutable state; one instance can be shared across
/// threads to validate many documents at once.
pub struct DeedPipeline<E> {
    extractor: E,
    counties: Arc<[County]>,
    rules: RuleEngine,
    county_match_threshold: f64,
}

impl<E: DeedExtractor> DeedPipeline<E> {
    /// Create a pipeline with the given extractor, reference table and settings.
    pub fn new(extractor: E, counties: impl Into<Arc<[County]>>, config: &ValidationConfig) -> Self {
        Self {
            extractor,
            counties: counties.into(),
            rules: RuleEngine::new().with_tolerance(config.money_tolerance),
            county_match_threshold: config.county_match_threshold,
        }
    }

    /// Run the full pipeline on raw OCR text.
    pub fn validate_document(&self, raw_text: &str) -> ValidationResult {
        let start = Instant::now();

        let extracted = match self.extractor.extract(raw_text) {
            Ok(deed) => deed,
            Err(err) => {
                warn!("Extraction failed: {}", err);
                return ValidationResult::failed(vec![err.into()]);
            }
        };
        debug!("Extracted document {}", extracted.doc);

        let result = self.validate_extracted(extracted);
        debug!("Pipeline finished in {:?}", start.elapsed());
        result
    }

    /// Run enrichment, rules and cost computation on already extracted fields.
    pub fn validate_extracted(&self, extracted: ExtractedDeed) -> ValidationResult {
        match self.evaluate(extracted) {
            Ok((deed, closing_cost)) => {
                info!(
                    "Document {} passed; closing cost {}",
                    deed.extracted.doc, closing_cost
                );
                ValidationResult::passed(deed, closing_cost)
            }
            Err(err) => {
                let errors = into_validation_errors(err);
                warn!("Document failed with {} error(s)", errors.len());
                ValidationResult::failed(errors)
            }
        }
    }

    fn evaluate(&self, extracted: ExtractedDeed) -> Result<(EnrichedDeed, Decimal), DeedError> {
        // County failures stop here; date and amount rules never run.
        let deed = enrich_with_county(extracted, &self.counties, self.county_match_threshold)?;
        info!(
            "County resolved: '{}' -> '{}' (confidence {:.1}%)",
            deed.extracted.county_raw,
            deed.county_canonical,
            deed.match_confidence * 100.0
        );

        self.rules.validate(
            &deed.extracted.date_signed,
            &deed.extracted.date_recorded,
            deed.extracted.amount_numeric,
            &deed.extracted.amount_words,
        )?;

        let closing_cost = closing_cost(&deed).ok_or_else(|| {
            DeedError::Overflow(format!(
                "closing cost for amount {} at rate {}",
                deed.extracted.amount_numeric, deed.tax_rate
            ))
        })?;

        Ok((deed, closing_cost))
    }
}

/// Transaction amount times county tax rate, `None` on overflow.
pub fn closing_cost(deed: &EnrichedDeed) -> Option<Decimal> {
    deed.extracted.amount_numeric.checked_mul(deed.tax_rate)
}

fn into_validation_errors(err: DeedError) -> Vec<ValidationError> {
    match err {
        DeedError::Validation(failure) => failure.into_errors(),
        DeedError::CountyMatch(err) => vec![err.into()],
        DeedError::Extraction(err) => vec![err.into()],
        other => vec![ValidationError::new(ErrorKind::Unexpected, other.to_string())],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractionError;
    use crate::extract::LabeledTextExtractor;
    use pretty_assertions::assert_eq;

    const RAW: &str = "*** RECORDING REQ ***
Doc: DEED-TRUST-0042
County: S. Clara  |  State: CA
Date Signed: 2024-01-15
Date Recorded: 2024-01-10
Grantor:  T.E.S.L.A. Holdings LLC
Grantee:  John  &  Sarah  Connor
Amount: $1,250,000.00 (One Million Two Hundred Thousand Dollars)
APN: 992-001-XA
Status: PRELIMINARY
*** END ***";

    struct FailingExtractor;

    impl DeedExtractor for FailingExtractor {
        fn extract(&self, _raw_text: &str) -> crate::extract::Result<ExtractedDeed> {
            Err(ExtractionError::MissingField(vec!["apn".to_string()]))
        }
    }

    fn counties() -> Vec<County> {
        vec![
            County::new("Santa Clara", Decimal::new(12, 3)),
            County::new("San Mateo", Decimal::new(11, 3)),
            County::new("Santa Cruz", Decimal::new(10, 3)),
        ]
    }

    fn pipeline() -> DeedPipeline<LabeledTextExtractor> {
        DeedPipeline::new(LabeledTextExtractor::new(), counties(), &ValidationConfig::default())
    }

    #[test]
    fn test_bad_deed_reports_every_rule_failure() {
        let result = pipeline().validate_document(RAW);

        assert!(!result.is_passed());
        assert!(result.deed().is_none());
        assert!(result.closing_cost().is_none());

        let kinds: Vec<ErrorKind> = result.errors().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![ErrorKind::InvalidDateSequence, ErrorKind::AmountMismatch]);
    }

    #[test]
    fn test_good_deed_passes_with_closing_cost() {
        let raw = RAW
            .replace("Date Recorded: 2024-01-10", "Date Recorded: 2024-01-20")
            .replace("$1,250,000.00", "$1,200,000.00");
        let result = pipeline().validate_document(&raw);

        assert!(result.is_passed(), "errors: {:?}", result.errors());
        assert!(result.errors().is_empty());

        let deed = result.deed().unwrap();
        assert_eq!(deed.county_canonical, "Santa Clara");
        assert_eq!(deed.match_confidence, 1.0);
        assert_eq!(result.closing_cost(), Some(Decimal::from(14_400)));
    }

    #[test]
    fn test_county_failure_short_circuits_rules() {
        let raw = RAW.replace("S. Clara", "Unknown County");
        let result = pipeline().validate_document(&raw);

        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.errors()[0].kind, ErrorKind::CountyMatch);
        assert_eq!(result.errors()[0].field.as_deref(), Some("county_raw"));
    }

    #[test]
    fn test_extraction_failure_is_terminal() {
        let pipeline = DeedPipeline::new(FailingExtractor, counties(), &ValidationConfig::default());
        let result = pipeline.validate_document("anything");

        assert!(!result.is_passed());
        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.errors()[0].kind, ErrorKind::MissingField);
    }

    #[test]
    fn test_tolerance_comes_from_config() {
        let config = ValidationConfig {
            money_tolerance: Decimal::from(100_000),
            ..ValidationConfig::default()
        };
        let pipeline = DeedPipeline::new(LabeledTextExtractor::new(), counties(), &config);
        let raw = RAW.replace("Date Recorded: 2024-01-10", "Date Recorded: 2024-01-20");

        let result = pipeline.validate_document(&raw);
        assert!(result.is_passed());
        assert_eq!(result.closing_cost(), Some(Decimal::from(15_000)));
    }

    #[test]
    fn test_closing_cost_overflow_is_reported() {
        let config = ValidationConfig {
            money_tolerance: Decimal::MAX,
            ..ValidationConfig::default()
        };
        let pipeline = DeedPipeline::new(
            LabeledTextExtractor::new(),
            vec![County::new("Santa Clara", Decimal::from(2))],
            &config,
        );
        let extracted = LabeledTextExtractor::new().extract(RAW).unwrap();
        let extracted = ExtractedDeed {
            date_recorded: "2024-01-20".to_string(),
            amount_numeric: Decimal::MAX,
            ..extracted
        };

        let result = pipeline.validate_extracted(extracted);

        assert!(!result.is_passed());
        assert!(result.closing_cost().is_none());
        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.errors()[0].kind, ErrorKind::Unexpected);
        assert!(result.errors()[0].message.contains("overflow"));
    }

    #[test]
    fn test_pipeline_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DeedPipeline<LabeledTextExtractor>>();
    }
}
