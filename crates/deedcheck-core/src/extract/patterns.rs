//! Common regex patterns for deed recording sheets.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // "Label: value" cell; a line may hold several cells separated by '|'
    pub static ref LABELED_CELL: Regex = Regex::new(
        r"^\s*([A-Za-z][A-Za-z .#/]*?)\s*:\s*(.*?)\s*$"
    ).unwrap();

    // "$1,250,000.00 (One Million Two Hundred Fifty Thousand Dollars)"
    pub static ref AMOUNT_WITH_WORDS: Regex = Regex::new(
        r"^\$?\s*(-?[\d,]+(?:\.\d+)?)\s*\((.*)\)\s*$"
    ).unwrap();

    // Banner lines such as "*** RECORDING REQ ***"
    pub static ref BANNER: Regex = Regex::new(
        r"^\s*\*{2,}.*\*{2,}\s*$"
    ).unwrap();
}
