//! Tag normalization
//!
//! Tags are stored unique, lowercase, trimmed, non-empty and sorted.
//! The same cleanup runs at every entry point (construction, assignment,
//! row loading), so a record's tag list is always in normal form.

use serde_json::Value;
use std::collections::BTreeSet;
use tracing::debug;

/// Normalize a list of tags
///
/// Each entry is trimmed and lowercased; blank results are discarded,
/// duplicates collapse, and the result comes back sorted.
///
/// ```rust
/// # use sanctuary_common::tags::normalize_tags;
/// let tags = normalize_tags(["Nature", " Water", "nature", "  "]);
/// assert_eq!(tags, vec!["nature", "water"]);
/// ```
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut set = BTreeSet::new();
    for tag in tags {
        let cleaned = tag.as_ref().trim().to_lowercase();
        if !cleaned.is_empty() {
            set.insert(cleaned);
        }
    }
    let tags: Vec<String> = set.into_iter().collect();
    debug_assert!(is_normalized(&tags));
    tags
}

/// Normalize raw JSON tag values
///
/// Same cleanup as [`normalize_tags`]. Entries that are not strings are
/// dropped rather than rejected.
pub fn normalize_tag_values(values: &[Value]) -> Vec<String> {
    normalize_tags(text_entries(values))
}

/// Keep the text entries of a raw tag list, unmodified
///
/// Entries that are not strings are dropped and the count is logged at
/// `debug`.
pub fn text_entries(values: &[Value]) -> Vec<String> {
    let text: Vec<String> = values
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect();

    let dropped = values.len() - text.len();
    if dropped > 0 {
        debug!("Dropped {} non-text tag entries", dropped);
    }
    text
}

/// Check whether a tag list is already in normal form
pub fn is_normalized(tags: &[String]) -> bool {
    tags.windows(2).all(|w| w[0] < w[1])
        && tags
            .iter()
            .all(|t| !t.is_empty() && t.trim() == t && t.to_lowercase() == *t)
}
