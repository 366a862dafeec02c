//! String utilities for the domain layer.

/// Truncate a string to at most `max_chars` characters, ending in `...`
/// when shortened.
///
/// Counts characters rather than bytes so multibyte titles are cut at the
/// same visual length as ASCII ones.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = s.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Strip one leading and one trailing quote character (`"` or `'`).
pub fn strip_outer_quotes(s: &str) -> &str {
    let s = s.strip_prefix(['"', '\'']).unwrap_or(s);
    s.strip_suffix(['"', '\'']).unwrap_or(s)
}
