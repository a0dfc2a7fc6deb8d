//! Query variants and the composition draft consumed by validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single weighted keyword: `(term, weight)`.
pub type WeightedTerm = (String, f64);

/// A keyword- and date-constrained query.
///
/// Every field is optional while the query is being composed; validation
/// guarantees that at least one of the text and keyword fields is populated
/// before the query leaves the composer. Keyword terms stay in the order the
/// user added them and are unique within each field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SingleQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub title_all: Vec<WeightedTerm>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub title_any: Vec<WeightedTerm>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub title_not: Vec<WeightedTerm>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub body_all: Vec<WeightedTerm>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub body_any: Vec<WeightedTerm>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub body_not: Vec<WeightedTerm>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub page_all: Vec<WeightedTerm>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub page_any: Vec<WeightedTerm>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub page_not: Vec<WeightedTerm>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_date: Option<NaiveDate>,
}

impl SingleQuery {
    /// Build a query carrying only free text.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            query: Some(text.into()),
            ..Self::default()
        }
    }

    /// Whether the free-text field carries anything beyond whitespace.
    #[must_use]
    pub fn has_query_text(&self) -> bool {
        self.query
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty())
    }

    /// Whether any of the nine keyword fields holds at least one term.
    #[must_use]
    pub fn has_keywords(&self) -> bool {
        self.keyword_fields().iter().any(|field| !field.is_empty())
    }

    /// Whether both the text and every keyword field are empty.
    ///
    /// Date bounds alone do not make a query non-empty; they only constrain
    /// an otherwise populated one.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.has_query_text() && !self.has_keywords()
    }

    fn keyword_fields(&self) -> [&Vec<WeightedTerm>; 9] {
        [
            &self.title_all,
            &self.title_any,
            &self.title_not,
            &self.body_all,
            &self.body_any,
            &self.body_not,
            &self.page_all,
            &self.page_any,
            &self.page_not,
        ]
    }
}

/// Append a keyword to a field, preserving order and term uniqueness.
///
/// Returns `false` (leaving the field untouched) when the term is already
/// present.
pub fn push_unique_term(
    field: &mut Vec<WeightedTerm>,
    term: impl Into<String>,
    weight: f64,
) -> bool {
    let term = term.into();
    if field.iter().any(|(existing, _)| *existing == term) {
        return false;
    }
    field.push((term, weight));
    true
}

/// A canonical search query, ready to encode and run.
///
/// Serialized with a `type` tag taking exactly the values
/// `simple | single | merged | subquery`. Every consumer branches over all
/// four variants; there is no catch-all handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SearchQuery {
    /// Free text only.
    Simple { query: String },
    /// One keyword/date constrained query.
    Single(SingleQuery),
    /// Union-style combination of two to five single queries.
    Merged { queries: Vec<SingleQuery> },
    /// A base query plus one refinement searched within its results.
    Subquery { queries: Vec<SingleQuery> },
}

impl SearchQuery {
    /// The tag identifying this variant.
    #[must_use]
    pub fn kind(&self) -> QueryKind {
        match self {
            Self::Simple { .. } => QueryKind::Simple,
            Self::Single(_) => QueryKind::Single,
            Self::Merged { .. } => QueryKind::Merged,
            Self::Subquery { .. } => QueryKind::Subquery,
        }
    }

    /// Whether this query composes multiple single queries.
    #[must_use]
    pub fn is_joined(&self) -> bool {
        matches!(self, Self::Merged { .. } | Self::Subquery { .. })
    }
}

/// Discriminant of a [`SearchQuery`], used for history filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    Simple,
    Single,
    Merged,
    Subquery,
}

impl QueryKind {
    /// All four tags, in declaration order.
    pub const ALL: [Self; 4] = [Self::Simple, Self::Single, Self::Merged, Self::Subquery];
}

/// How the sub-queries of a draft combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinMode {
    /// Union-style combination, at most five sub-queries.
    Merged,
    /// Search within the previous result, at most one refinement.
    Subquery,
}

/// The user-composed draft handed to [`validate`](crate::validate).
///
/// The composer always edits a joined shape, even for what will collapse to
/// a simple or single query; validation decides the final variant.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedDraft {
    pub mode: JoinMode,
    pub queries: Vec<SingleQuery>,
}

impl Default for JoinedDraft {
    /// The composer's starting state: one empty single query, merged mode.
    fn default() -> Self {
        Self {
            mode: JoinMode::Merged,
            queries: vec![SingleQuery::default()],
        }
    }
}

impl JoinedDraft {
    /// Re-open a previously run query in the composer.
    #[must_use]
    pub fn from_query(query: Option<SearchQuery>) -> Self {
        match query {
            None => Self::default(),
            Some(SearchQuery::Simple { query }) => Self {
                mode: JoinMode::Merged,
                queries: vec![SingleQuery::from_text(query)],
            },
            Some(SearchQuery::Single(single)) => Self {
                mode: JoinMode::Merged,
                queries: vec![single],
            },
            Some(SearchQuery::Merged { queries }) => Self {
                mode: JoinMode::Merged,
                queries,
            },
            Some(SearchQuery::Subquery { queries }) => Self {
                mode: JoinMode::Subquery,
                queries,
            },
        }
    }

    /// Build a merged draft from previously stored queries.
    ///
    /// Simple queries convert to single queries carrying their text; joined
    /// queries cannot nest and are skipped.
    #[must_use]
    pub fn merged_from(queries: impl IntoIterator<Item = SearchQuery>) -> Self {
        let queries = queries
            .into_iter()
            .filter_map(|query| match query {
                SearchQuery::Simple { query } => Some(SingleQuery::from_text(query)),
                SearchQuery::Single(single) => Some(single),
                SearchQuery::Merged { .. } | SearchQuery::Subquery { .. } => None,
            })
            .collect();
        Self {
            mode: JoinMode::Merged,
            queries,
        }
    }

    /// Whether the composer may add another merging sub-query.
    #[must_use]
    pub fn can_add_merge(&self) -> bool {
        match self.mode {
            JoinMode::Subquery => self.queries.len() <= 1,
            JoinMode::Merged => self.queries.len() < 5,
        }
    }

    /// Whether the composer may add a subquery refinement.
    #[must_use]
    pub fn can_add_subquery(&self) -> bool {
        match self.mode {
            JoinMode::Merged => self.queries.len() <= 1,
            JoinMode::Subquery => self.queries.len() < 2,
        }
    }

    /// Append an empty merging sub-query, switching the draft to merged mode.
    pub fn add_merge_query(&mut self) -> bool {
        if !self.can_add_merge() {
            return false;
        }
        self.queries.push(SingleQuery::default());
        self.mode = JoinMode::Merged;
        true
    }

    /// Append an empty refinement, switching the draft to subquery mode.
    pub fn add_subquery(&mut self) -> bool {
        if !self.can_add_subquery() {
            return false;
        }
        self.queries.push(SingleQuery::default());
        self.mode = JoinMode::Subquery;
        true
    }

    /// Remove the sub-query at `index`, ignoring out-of-range requests.
    pub fn remove_query(&mut self, index: usize) {
        if index < self.queries.len() {
            self.queries.remove(index);
        }
    }
}
