//! Text cleanup and fuzzy matching for OCR'd names.

pub mod normalizer;
pub mod similarity;

pub use normalizer::{expand_abbreviations, normalize, ABBREVIATIONS};
pub use similarity::{best_match, similarity_score};
