//! Shared data model for `retrace`.
//!
//! This crate defines the three search-query variants and their composition
//! draft, the validation rules that turn a draft into a canonical
//! [`SearchQuery`], the string codec used for navigation and history
//! matching, and the payload types exchanged with the search and suggestion
//! collaborators.

pub mod codec;
mod history;
mod query;
mod results;
mod validate;

pub use codec::{decode, encode};
pub use history::{HistoryEntry, LikeState, WebpageOutcome};
pub use query::{
    JoinMode, JoinedDraft, QueryKind, SearchQuery, SingleQuery, WeightedTerm, push_unique_term,
};
pub use results::{QuerySuggestions, QueryVector, ScoredWord, SearchResponse, WebpageDetail};
pub use validate::{ValidationError, validate};
