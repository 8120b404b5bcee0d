//! County name normalization and abbreviation expansion.

/// Abbreviations commonly found in OCR'd county names.
///
/// Keys include the trailing period; a bare `s` is not an abbreviation.
pub const ABBREVIATIONS: &[(&str, &str)] = &[
    ("s.", "santa"),
    ("st.", "saint"),
    ("mt.", "mount"),
    ("n.", "north"),
    ("e.", "east"),
    ("w.", "west"),
    ("ft.", "fort"),
];

/// Normalize a name for matching.
///
/// Lowercases, deletes the `|` column separator left by OCR, then collapses
/// whitespace runs into single spaces and trims.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .replace('|', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize, then expand known abbreviations token by token.
///
/// Tokens that are not abbreviations lose any trailing periods.
pub fn expand_abbreviations(text: &str) -> String {
    normalize(text)
        .split(' ')
        .filter(|token| !token.is_empty())
        .map(|token| match lookup(token) {
            Some(expansion) => expansion,
            None => token.trim_end_matches('.'),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn lookup(token: &str) -> Option<&'static str> {
    ABBREVIATIONS
        .iter()
        .find(|(abbr, _)| *abbr == token)
        .map(|(_, expansion)| *expansion)
}
