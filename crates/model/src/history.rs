//! History entry types: what a past search looked like and how the user
//! engaged with its results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::query::{QueryKind, SearchQuery};
use crate::results::{QueryVector, WebpageDetail};

/// Explicit like/dislike feedback on one result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeState {
    Liked,
    Disliked,
    #[default]
    None,
}

/// One result page as it is remembered by the history: the page detail plus
/// the engagement the user showed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebpageOutcome {
    #[serde(flatten)]
    pub detail: WebpageDetail,
    /// Recorded relevance, `0` or `1`.
    pub relevance: u8,
    pub clicked: bool,
    #[serde(rename = "likeState")]
    pub like_state: LikeState,
}

impl WebpageOutcome {
    /// Whether this outcome carries a positive engagement signal. Only
    /// outcomes with a signal survive the amendment step into storage.
    #[must_use]
    pub fn has_signal(&self) -> bool {
        self.like_state == LikeState::Liked || self.clicked
    }
}

/// One recorded search: the query that ran (structural fields and tag,
/// flattened into the entry), when it ran, the vectors the ranking service
/// derived, and the outcomes the user engaged with.
///
/// Entries are identified by their position in the store, never by content.
/// An entry is created exactly once, at append time, with an empty
/// `webpages` list; the amendment step later overwrites it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub query: SearchQuery,
    pub timestamp: DateTime<Utc>,
    pub original_query_vector: QueryVector,
    pub modified_query_vector: QueryVector,
    pub webpages: Vec<WebpageOutcome>,
}

impl HistoryEntry {
    /// The entry recorded at append time.
    #[must_use]
    pub fn new(query: SearchQuery, original: QueryVector, modified: QueryVector) -> Self {
        Self {
            query,
            timestamp: Utc::now(),
            original_query_vector: original,
            modified_query_vector: modified,
            webpages: Vec::new(),
        }
    }

    /// Tag of the recorded query.
    #[must_use]
    pub fn kind(&self) -> QueryKind {
        self.query.kind()
    }
}
