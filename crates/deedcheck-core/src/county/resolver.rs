//! Mapping messy OCR county names to canonical counties.

use tracing::debug;

use crate::error::CountyMatchError;
use crate::models::deed::{County, CountyMatch, EnrichedDeed, ExtractedDeed};
use crate::text::{best_match, expand_abbreviations, normalize};

/// Default minimum similarity for a fuzzy match.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.8;

/// Resolve a raw county name against the reference table.
///
/// An exact match always wins, with confidence 1.0, before any fuzzy scoring
/// takes place. A county matches exactly when its normalized name equals the
/// normalized input, or its expanded name equals the expanded input.
pub fn resolve_county(
    raw: &str,
    counties: &[County],
    threshold: f64,
) -> Result<CountyMatch, CountyMatchError> {
    let normalized = normalize(raw);
    let expanded = expand_abbreviations(raw);

    let exact = counties.iter().find(|c| {
        let name = normalize(&c.name);
        name == normalized || name == expanded || expand_abbreviations(&c.name) == expanded
    });
    if let Some(county) = exact {
        debug!("County '{}' matched '{}' exactly", raw, county.name);
        return Ok(CountyMatch {
            name: county.name.clone(),
            tax_rate: county.tax_rate,
            confidence: 1.0,
        });
    }

    let (best, confidence) = best_match(&expanded, counties.iter().map(|c| c.name.as_str()), threshold);

    let county = best.and_then(|name| counties.iter().find(|c| c.name == name));
    match county {
        Some(county) => {
            debug!(
                "County '{}' fuzzy matched '{}' with confidence {:.3}",
                raw, county.name, confidence
            );
            Ok(CountyMatch {
                name: county.name.clone(),
                tax_rate: county.tax_rate,
                confidence,
            })
        }
        None => Err(CountyMatchError {
            raw: raw.to_string(),
            normalized,
            expanded,
            candidates: counties.iter().map(|c| c.name.clone()).collect(),
            threshold,
        }),
    }
}

/// Attach the resolved county to an extracted deed.
pub fn enrich_with_county(
    extracted: ExtractedDeed,
    counties: &[County],
    threshold: f64,
) -> Result<EnrichedDeed, CountyMatchError> {
    let county = resolve_county(&extracted.county_raw, counties, threshold)?;
    Ok(EnrichedDeed::new(extracted, county))
}
