//! Inline emphasis normalization.

use once_cell::sync::Lazy;
use regex::Regex;

/// `**text**`, shortest match, single line
static EMPHASIS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("Invalid emphasis regex pattern"));

/// Replace every `**text**` pair with `<strong>text</strong>`.
///
/// Unpaired markers are left alone.
pub fn normalize_emphasis(text: &str) -> String {
    EMPHASIS_REGEX
        .replace_all(text, "<strong>$1</strong>")
        .into_owned()
}
