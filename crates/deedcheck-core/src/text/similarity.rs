//! String similarity for fuzzy name matching.

/// Case-insensitive similarity in `[0, 1]`.
///
/// Normalized Levenshtein ratio: `1 - distance / max_len`. Symmetric, and
/// `1.0` for equal strings (including two empty strings).
pub fn similarity_score(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(&a.to_lowercase(), &b.to_lowercase())
}

/// Find the highest scoring candidate for `query`.
///
/// The first candidate wins on ties. Returns `(None, 0.0)` when there are no
/// candidates or the best score is below `min_score`.
pub fn best_match<'a, I>(query: &str, candidates: I, min_score: f64) -> (Option<&'a str>, f64)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, f64)> = None;

    for candidate in candidates {
        let score = similarity_score(query, candidate);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((candidate, score)),
        }
    }

    match best {
        Some((candidate, score)) if score >= min_score => (Some(candidate), score),
        _ => (None, 0.0),
    }
}
