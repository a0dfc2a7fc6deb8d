//! Payload types returned by the search and suggestion collaborators.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::query::{SearchQuery, SingleQuery};

/// Term → (original weight, modified weight), in the order the collaborator
/// ranked the terms.
pub type QueryVector = IndexMap<String, (f64, f64)>;

/// A scored term triple `(term, score, score)` as the collaborators report
/// term statistics.
pub type ScoredWord = (String, f64, f64);

/// Everything the ranking service knows about one result page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebpageDetail {
    pub webpage_id: u64,
    pub url: String,
    pub title: String,
    pub last_modified_date: String,
    pub size: u64,
    pub top_tfs: Vec<ScoredWord>,
    pub top_tfidfs: Vec<ScoredWord>,
    pub parents: Vec<String>,
    pub children: Vec<String>,
    pub modified_score: f64,
    pub original_score: f64,
}

impl WebpageDetail {
    /// Build a query for pages similar to this one, seeded from its
    /// strongest term frequencies.
    #[must_use]
    pub fn similar_page_query(&self) -> SearchQuery {
        SearchQuery::Single(SingleQuery {
            page_any: self
                .top_tfs
                .iter()
                .map(|(term, weight, _)| (term.clone(), *weight))
                .collect(),
            ..SingleQuery::default()
        })
    }
}

/// Response of the search collaborator: ranked `(detail, score)` pairs plus
/// the query vectors used to produce them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub webpages: Vec<(WebpageDetail, f64)>,
    pub original_query_vector: QueryVector,
    pub modified_query_vector: QueryVector,
}

/// Response of the suggestion collaborator. Each list is independently
/// optional; an absent list means the service had nothing to offer for that
/// category, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySuggestions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similar_queries: Option<Vec<(String, f64)>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuzzy_matched_words: Option<Vec<ScoredWord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevant_words: Option<Vec<ScoredWord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub co_occurring_words: Option<Vec<ScoredWord>>,
}

impl QuerySuggestions {
    /// Whether every category is absent or empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.similar_queries.as_deref().is_none_or(<[_]>::is_empty)
            && self
                .fuzzy_matched_words
                .as_deref()
                .is_none_or(<[_]>::is_empty)
            && self.relevant_words.as_deref().is_none_or(<[_]>::is_empty)
            && self
                .co_occurring_words
                .as_deref()
                .is_none_or(<[_]>::is_empty)
    }
}
