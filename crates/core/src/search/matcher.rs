//! Free-text stop name matching.

/// Lowercase and trim a query or stop name before comparison.
pub(crate) fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Does a free-text query match a stop name?
///
/// True when either normalized string contains the other as a substring.
/// Deliberately loose: a short or partial query matches broadly, at the cost
/// of false positives on short stop names. No tokenization, edit distance,
/// or diacritic folding.
///
/// A blank query never matches (callers reject blank input up front), and
/// a blank stop name never matches either.
pub fn stop_matches(query: &str, stop: &str) -> bool {
    let query = normalize(query);
    let stop = normalize(stop);

    if query.is_empty() || stop.is_empty() {
        return false;
    }

    stop.contains(&query) || query.contains(&stop)
}
