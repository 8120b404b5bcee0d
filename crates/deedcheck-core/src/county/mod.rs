//! County reference data and name resolution.

pub mod reference;
pub mod resolver;

pub use reference::{embedded_counties, load_counties, load_reference, parse_counties};
pub use resolver::{enrich_with_county, resolve_county, DEFAULT_MATCH_THRESHOLD};
