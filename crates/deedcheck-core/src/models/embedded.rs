//! Built-in county reference table for standalone binary distribution.

/// Embedded county table (JSON array of `{name, tax_rate}`).
pub static COUNTIES_JSON: &str = include_str!("../../../../data/counties.json");
