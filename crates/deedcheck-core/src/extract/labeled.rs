//! Rule-based extractor for "Label: value" recording sheets.

use std::collections::HashMap;

use tracing::debug;

use super::patterns::{AMOUNT_WITH_WORDS, BANNER, LABELED_CELL};
use super::{parse_amount, DeedExtractor, Result};
use crate::error::ExtractionError;
use crate::models::deed::{ExtractedDeed, REQUIRED_FIELDS};

/// Label spellings accepted for each field.
const LABELS: &[(&str, &[&str])] = &[
    ("doc", &["doc", "doc no", "doc #", "document", "document no", "document number"]),
    ("county_raw", &["county"]),
    ("state", &["state"]),
    ("date_signed", &["date signed", "signed", "signing date", "execution date"]),
    ("date_recorded", &["date recorded", "recorded", "recording date"]),
    ("grantor", &["grantor", "seller"]),
    ("grantee", &["grantee", "buyer"]),
    ("amount_numeric", &["amount numeric", "consideration", "sale price"]),
    ("amount_words", &["amount in words", "amount words", "written amount"]),
    ("apn", &["apn", "parcel", "parcel id", "parcel number"]),
    ("status", &["status"]),
];

/// Extractor for plain-text recording sheets.
///
/// Each line holds one or more `Label: value` cells separated by `|`. An
/// `Amount:` cell of the form `$N (words)` fills both amount fields. The
/// first occurrence of a field wins.
#[derive(Debug, Clone, Default)]
pub struct LabeledTextExtractor;

impl LabeledTextExtractor {
    pub fn new() -> Self {
        Self
    }

    fn collect_fields(&self, text: &str) -> HashMap<&'static str, String> {
        let mut fields: HashMap<&'static str, String> = HashMap::new();

        for line in text.lines().filter(|l| !BANNER.is_match(l)) {
            for cell in line.split('|') {
                let Some(caps) = LABELED_CELL.captures(cell) else {
                    continue;
                };
                let label = normalize_label(&caps[1]);
                let value = caps[2].to_string();

                if label == "amount" {
                    match AMOUNT_WITH_WORDS.captures(&value) {
                        Some(amount) => {
                            fields.entry("amount_numeric").or_insert_with(|| amount[1].to_string());
                            fields.entry("amount_words").or_insert_with(|| amount[2].trim().to_string());
                        }
                        None => {
                            fields.entry("amount_numeric").or_insert(value);
                        }
                    }
                    continue;
                }

                if let Some(field) = field_for_label(&label) {
                    fields.entry(field).or_insert(value);
                }
            }
        }

        fields
    }
}

impl DeedExtractor for LabeledTextExtractor {
    fn extract(&self, raw_text: &str) -> Result<ExtractedDeed> {
        let mut fields = self.collect_fields(raw_text);
        debug!("Found {} labeled deed fields", fields.len());

        if fields.is_empty() {
            return Err(ExtractionError::NoData);
        }

        let missing: Vec<String> = REQUIRED_FIELDS
            .iter()
            .filter(|f| !fields.contains_key(**f))
            .map(|f| f.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ExtractionError::MissingField(missing));
        }

        let mut take = |field: &str| fields.remove(field).unwrap_or_default();
        let amount_text = take("amount_numeric");

        Ok(ExtractedDeed {
            doc: take("doc"),
            county_raw: take("county_raw"),
            state: take("state"),
            date_signed: take("date_signed"),
            date_recorded: take("date_recorded"),
            grantor: take("grantor"),
            grantee: take("grantee"),
            amount_numeric: parse_amount("amount_numeric", &amount_text)?,
            amount_words: take("amount_words"),
            apn: take("apn"),
            status: take("status"),
        })
    }
}

fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end_matches('.')
        .to_lowercase()
}

fn field_for_label(label: &str) -> Option<&'static str> {
    LABELS
        .iter()
        .find(|(_, aliases)| aliases.contains(&label))
        .map(|(field, _)| *field)
}
