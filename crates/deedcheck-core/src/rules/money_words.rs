//! Written amount parsing ("One Million Two Hundred Thousand Dollars").

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;

use crate::error::MoneyParseError;

lazy_static! {
    static ref CURRENCY_WORD: Regex = Regex::new(r"\bdollars?\b").unwrap();
    static ref NON_ALPHANUMERIC: Regex = Regex::new(r"[^a-z0-9\s]").unwrap();
}

/// Result type for money word parsing.
pub type Result<T> = std::result::Result<T, MoneyParseError>;

fn unit_value(word: &str) -> Option<u64> {
    let value = match word {
        "zero" => 0,
        "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        "thirteen" => 13,
        "fourteen" => 14,
        "fifteen" => 15,
        "sixteen" => 16,
        "seventeen" => 17,
        "eighteen" => 18,
        "nineteen" => 19,
        "twenty" => 20,
        "thirty" => 30,
        "forty" => 40,
        "fifty" => 50,
        "sixty" => 60,
        "seventy" => 70,
        "eighty" => 80,
        "ninety" => 90,
        _ => return None,
    };
    Some(value)
}

fn scale_value(word: &str) -> Option<u64> {
    let value = match word {
        "hundred" => 100,
        "thousand" => 1_000,
        "million" => 1_000_000,
        "billion" => 1_000_000_000,
        "trillion" => 1_000_000_000_000,
        _ => return None,
    };
    Some(value)
}

/// Lowercase, drop "dollar(s)", turn punctuation into spaces and collapse
/// whitespace.
pub fn normalize_money_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let without_currency = CURRENCY_WORD.replace_all(&lowered, " ");
    NON_ALPHANUMERIC
        .replace_all(&without_currency, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse an English cardinal phrase into an amount.
///
/// `thousand` and larger scales close a group and fold it into the total;
/// `hundred` multiplies the group in progress. So "one million two hundred
/// thousand" is `1_000_000 + 200 * 1_000`.
pub fn parse_money_words(text: &str) -> Result<Decimal> {
    let normalized = normalize_money_text(text);
    if normalized.is_empty() {
        return Err(MoneyParseError::Empty);
    }

    let overflow = || MoneyParseError::Overflow(text.trim().to_string());

    let mut current: u64 = 0;
    let mut total: u64 = 0;

    for word in normalized.split(' ') {
        if let Some(value) = unit_value(word) {
            current = current.checked_add(value).ok_or_else(overflow)?;
        } else if let Some(scale) = scale_value(word) {
            if current == 0 {
                current = 1;
            }
            let grouped = current.checked_mul(scale).ok_or_else(overflow)?;
            if scale >= 1_000 {
                total = total.checked_add(grouped).ok_or_else(overflow)?;
                current = 0;
            } else {
                current = grouped;
            }
        } else if word == "and" {
            continue;
        } else if word == "a" {
            current = 1;
        } else {
            return Err(MoneyParseError::UnknownWord(word.to_string()));
        }
    }

    total = total.checked_add(current).ok_or_else(overflow)?;
    Ok(Decimal::from(total))
}

/// Format an amount as US currency with two decimals ("$1,250,000.00").
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let s = format!("{:.2}", rounded.abs());
    let (integer_part, decimal_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    let chars: Vec<char> = integer_part.chars().collect();
    let mut grouped = String::with_capacity(chars.len() + chars.len() / 3);

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    format!("{sign}${grouped}.{decimal_part}")
}
