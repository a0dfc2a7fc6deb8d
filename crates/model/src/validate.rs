//! Turns a composed draft into a canonical query, or reports why it cannot.

use thiserror::Error;

use crate::query::{JoinMode, JoinedDraft, SearchQuery, SingleQuery};

/// Why a draft was rejected.
///
/// The `Display` strings are the user-facing messages; they block submission
/// and the draft stays with the caller for correction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("at least 1 query required")]
    NoQueries,

    /// At least one sub-query has neither free text nor keywords. Reported
    /// once for the whole draft, not per offending sub-query.
    #[error("query or keyword required")]
    EmptyQuery,

    #[error("too many merge queries (max 5)")]
    TooManyMerged,

    #[error("only 1 subquery allowed")]
    TooManySubqueries,
}

/// Validate a draft and collapse it to its canonical variant.
///
/// A one-element draft collapses to [`SearchQuery::Simple`] when its only
/// populated field is the free text, and to [`SearchQuery::Single`]
/// otherwise. Larger drafts pass through unchanged once the per-mode size
/// limits hold. The draft is consumed; nothing is mutated on failure paths
/// the caller could observe.
pub fn validate(draft: JoinedDraft) -> Result<SearchQuery, ValidationError> {
    let JoinedDraft { mode, mut queries } = draft;

    if queries.is_empty() {
        return Err(ValidationError::NoQueries);
    }
    if queries.iter().any(SingleQuery::is_empty) {
        return Err(ValidationError::EmptyQuery);
    }

    if queries.len() == 1 {
        let only = queries.remove(0);
        if only.has_query_text() && !only.has_keywords() {
            return Ok(SearchQuery::Simple {
                query: only.query.unwrap_or_default(),
            });
        }
        return Ok(SearchQuery::Single(only));
    }

    match mode {
        JoinMode::Merged if queries.len() > 5 => Err(ValidationError::TooManyMerged),
        JoinMode::Subquery if queries.len() > 2 => Err(ValidationError::TooManySubqueries),
        JoinMode::Merged => Ok(SearchQuery::Merged { queries }),
        JoinMode::Subquery => Ok(SearchQuery::Subquery { queries }),
    }
}
