//! Deterministic business rules for deed documents.

pub mod amounts;
pub mod dates;
pub mod engine;
pub mod money_words;

pub use amounts::{validate_amount_consistency, DEFAULT_TOLERANCE};
pub use dates::{days_between, parse_date, validate_date_sequence};
pub use engine::{validate_deed, RuleEngine};
pub use money_words::{format_money, parse_money_words};
