//! Ranking extraction from free-form judge responses.
//!
//! Judges are asked to finish with a `FINAL RANKING:` line followed by a
//! numbered list of labels. Models do not always comply, so extraction is
//! tolerant: it falls back to bare label mentions and never fails.
//!
//! | Pass | Pattern | Example |
//! |------|---------|---------|
//! | primary | `<digits>. Response <Letter>` | `1. Response C` |
//! | fallback | `Response <Letter>` | `...Response A is best...` |

use regex::Regex;
use std::sync::LazyLock;

/// Marker line that opens the ranking section of a judge response.
pub const FINAL_RANKING_MARKER: &str = "FINAL RANKING:";

static NUMBERED_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\s*(Response [A-Z])").expect("valid regex"));

static BARE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Response [A-Z]").expect("valid regex"));

/// Extract the ordered labels (best first) from a judge's response.
///
/// When a `FINAL RANKING:` marker exists, only the text following it (up to
/// a repeated marker, if any) is scanned; otherwise the whole text is.
/// Fallback matches are not deduplicated, so a label mentioned twice in
/// prose is returned twice.
///
/// # Examples
///
/// ```
/// use council_domain::council::parsing::parse_ranking;
///
/// let text = "A is thin.\nFINAL RANKING:\n1. Response C\n2. Response A\n3. Response B";
/// assert_eq!(parse_ranking(text), vec!["Response C", "Response A", "Response B"]);
/// assert!(parse_ranking("no ranking here").is_empty());
/// ```
pub fn parse_ranking(text: &str) -> Vec<String> {
    let section = text.split(FINAL_RANKING_MARKER).nth(1).unwrap_or(text);

    let numbered: Vec<String> = NUMBERED_LABEL
        .captures_iter(section)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect();
    if !numbered.is_empty() {
        return numbered;
    }

    BARE_LABEL
        .find_iter(section)
        .map(|m| m.as_str().to_string())
        .collect()
}
