//! Static degraded-fallback payloads served when a collaborator cannot be
//! reached, and a provider that always serves them.

use retrace_model::{
    HistoryEntry, QuerySuggestions, QueryVector, SearchQuery, SearchResponse, WebpageDetail,
};
use tracing::debug;

/// The payload a search request degrades to.
///
/// One recognizable placeholder result with empty query vectors; enough for
/// the results view to render without a special error state.
#[must_use]
pub fn fallback_search_response() -> SearchResponse {
    let page = WebpageDetail {
        webpage_id: 0,
        url: "https://example.com".into(),
        title: "Example Domain".into(),
        last_modified_date: "1995-08-14".into(),
        size: 1_256,
        top_tfs: vec![
            ("example".into(), 30.0, 30.0),
            ("domain".into(), 30.0, 30.0),
            ("documents".into(), 80.0, 50.0),
        ],
        top_tfidfs: vec![
            ("example".into(), 30.0, 30.0),
            ("domain".into(), 30.0, 30.0),
            ("documents".into(), 80.0, 50.0),
        ],
        parents: Vec::new(),
        children: Vec::new(),
        modified_score: 40.0,
        original_score: 40.0,
    };

    SearchResponse {
        webpages: vec![(page, 40.0)],
        original_query_vector: QueryVector::new(),
        modified_query_vector: QueryVector::new(),
    }
}

/// The payload a suggestion request degrades to.
#[must_use]
pub fn fallback_suggestions() -> QuerySuggestions {
    QuerySuggestions {
        similar_queries: Some(vec![
            ("example query".into(), 0.9),
            ("another example".into(), 0.8),
        ]),
        fuzzy_matched_words: Some(vec![
            ("fuzzy term".into(), 0.9, 0.8),
            ("another fuzzy".into(), 0.7, 0.6),
        ]),
        relevant_words: Some(vec![
            ("relevant term".into(), 0.3, 0.2),
            ("another relevant".into(), 0.1, 0.05),
        ]),
        co_occurring_words: Some(vec![
            ("co-occurring term".into(), 0.7, 0.6),
            ("another co-occurring".into(), 0.5, 0.4),
        ]),
    }
}

/// Provider that always serves the fallback payloads.
///
/// Stands in for the remote services in the CLI and in tests; also the
/// degraded path an HTTP-backed provider collapses to when its transport
/// fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticProvider;

impl super::SearchProvider for StaticProvider {
    fn search(&self, query: &SearchQuery, _history: &[HistoryEntry]) -> SearchResponse {
        debug!(kind = ?query.kind(), "serving static search payload");
        fallback_search_response()
    }
}

impl super::SuggestionProvider for StaticProvider {
    fn suggest(&self, input: &str, _history: &[HistoryEntry]) -> QuerySuggestions {
        if input.trim().is_empty() {
            return QuerySuggestions::default();
        }
        debug!(input, "serving static suggestion payload");
        fallback_suggestions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::SuggestionProvider;

    #[test]
    fn blank_input_suggests_nothing() {
        let provider = StaticProvider;
        assert!(provider.suggest("  ", &[]).is_empty());
        assert!(!provider.suggest("rust", &[]).is_empty());
    }
}
