//! Conversation title normalization

use super::entities::DEFAULT_TITLE;
use crate::core::string::{strip_outer_quotes, truncate_chars};

/// Longest title kept before truncation.
pub const MAX_TITLE_CHARS: usize = 50;

/// Clean up a title model's raw reply.
///
/// Trims whitespace, drops one pair of surrounding quotes and shortens
/// anything longer than [`MAX_TITLE_CHARS`]. An empty reply becomes the
/// default title.
pub fn normalize_title(raw: &str) -> String {
    let title = strip_outer_quotes(raw.trim());
    if title.is_empty() {
        return DEFAULT_TITLE.to_string();
    }
    truncate_chars(title, MAX_TITLE_CHARS)
}
