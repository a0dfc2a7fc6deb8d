//! Request bodies and endpoint routing for the remote collaborators.

use retrace_model::{HistoryEntry, SearchQuery};
use serde::Serialize;

/// Endpoint serving simple and single queries.
pub const SEARCH_ENDPOINT: &str = "/search";
/// Endpoint serving merged and subquery compositions.
pub const JOINED_SEARCH_ENDPOINT: &str = "/joined_search";
/// Endpoint serving typing suggestions.
pub const SUGGEST_ENDPOINT: &str = "/suggest_query";

/// Body posted to the search collaborator.
///
/// Simple and single queries travel under a `query` key; merged and
/// subquery compositions under `queries`, against their own endpoint. Both
/// shapes carry the full history snapshot.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SearchRequestBody<'a> {
    Plain {
        query: &'a SearchQuery,
        history: &'a [HistoryEntry],
    },
    Joined {
        queries: &'a SearchQuery,
        history: &'a [HistoryEntry],
    },
}

impl<'a> SearchRequestBody<'a> {
    /// Pick the wire shape for `query`.
    #[must_use]
    pub fn new(query: &'a SearchQuery, history: &'a [HistoryEntry]) -> Self {
        match query {
            SearchQuery::Simple { .. } | SearchQuery::Single(_) => Self::Plain { query, history },
            SearchQuery::Merged { .. } | SearchQuery::Subquery { .. } => Self::Joined {
                queries: query,
                history,
            },
        }
    }

    /// The endpoint this body must be posted to.
    #[must_use]
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Plain { .. } => SEARCH_ENDPOINT,
            Self::Joined { .. } => JOINED_SEARCH_ENDPOINT,
        }
    }
}

/// Body posted to the suggestion collaborator.
#[derive(Debug, Serialize)]
pub struct SuggestRequestBody<'a> {
    pub query: &'a str,
    pub history: &'a [HistoryEntry],
}

#[cfg(test)]
mod tests {
    use retrace_model::SingleQuery;
    use serde_json::Value;

    use super::*;

    #[test]
    fn plain_queries_travel_under_the_query_key() {
        let query = SearchQuery::Simple {
            query: "cats".into(),
        };
        let body = SearchRequestBody::new(&query, &[]);
        assert_eq!(body.endpoint(), SEARCH_ENDPOINT);

        let value: Value = serde_json::to_value(&body).expect("body serializes");
        assert_eq!(value["query"]["type"], "simple");
        assert_eq!(value["query"]["query"], "cats");
        assert!(value["history"].as_array().is_some_and(Vec::is_empty));
    }

    #[test]
    fn joined_queries_travel_under_the_queries_key() {
        let query = SearchQuery::Merged {
            queries: vec![SingleQuery::from_text("a"), SingleQuery::from_text("b")],
        };
        let body = SearchRequestBody::new(&query, &[]);
        assert_eq!(body.endpoint(), JOINED_SEARCH_ENDPOINT);

        let value: Value = serde_json::to_value(&body).expect("body serializes");
        assert_eq!(value["queries"]["type"], "merged");
        assert!(value.get("query").is_none());
    }

    #[test]
    fn suggest_body_carries_the_raw_input() {
        let body = SuggestRequestBody {
            query: "rus",
            history: &[],
        };
        let value: Value = serde_json::to_value(&body).expect("body serializes");
        assert_eq!(value["query"], "rus");
    }
}
