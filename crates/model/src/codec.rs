//! Canonical string codec for [`SearchQuery`] values.
//!
//! The encoded form doubles as the navigation parameter and as the canonical
//! text compared during history matching, so both directions must agree on
//! one representation: compact JSON, struct fields in declaration order,
//! populated fields always present, unpopulated optional fields omitted.

use crate::query::SearchQuery;

/// Encode a query to its canonical transportable text.
#[must_use]
pub fn encode(query: &SearchQuery) -> String {
    serde_json::to_string(query).expect("a search query always serializes")
}

/// Decode a transportable string back into a query.
///
/// Transport layers substitute space characters before handing the parameter
/// over (`%20` or `_` depending on the carrier). The raw text is parsed
/// first, so an encoding that happens to contain those sequences literally
/// round-trips untouched; the substitutions are only undone when the raw
/// parse fails. Malformed input yields `None`, never a fault.
#[must_use]
pub fn decode(input: &str) -> Option<SearchQuery> {
    let raw = input.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(query) = serde_json::from_str(raw) {
        return Some(query);
    }

    let percent = raw.replace("%20", " ");
    if let Ok(query) = serde_json::from_str(&percent) {
        return Some(query);
    }

    let underscore = percent.replace('_', " ");
    serde_json::from_str(&underscore).ok()
}
