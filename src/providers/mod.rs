//! Trait seams for the remote search and suggestion collaborators.
//!
//! The core never talks to the network itself. Implementations own their
//! transport and their failure policy: a request that cannot complete is
//! not retried and never surfaces an error; it degrades to the static
//! fallback payload and returns immediately, so an outage renders the same
//! way as "no data".

mod fallback;
mod wire;

pub use fallback::{StaticProvider, fallback_search_response, fallback_suggestions};
pub use wire::{
    JOINED_SEARCH_ENDPOINT, SEARCH_ENDPOINT, SUGGEST_ENDPOINT, SearchRequestBody,
    SuggestRequestBody,
};

use retrace_model::{HistoryEntry, QuerySuggestions, SearchQuery, SearchResponse};

/// Remote search-ranking service.
pub trait SearchProvider {
    /// Rank results for `query`, given the full history snapshot.
    fn search(&self, query: &SearchQuery, history: &[HistoryEntry]) -> SearchResponse;
}

/// Remote typing-suggestion service.
pub trait SuggestionProvider {
    /// Suggest completions and related terms for a partial input.
    fn suggest(&self, input: &str, history: &[HistoryEntry]) -> QuerySuggestions;
}
