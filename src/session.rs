//! Submission, result capture, and debounced history amendment.

use std::time::Instant;

use retrace_history::{HistoryStore, StoreError};
use retrace_model::{
    HistoryEntry, JoinedDraft, LikeState, SearchQuery, ValidationError, WebpageDetail,
    WebpageOutcome, codec, validate,
};
use serde::Serialize;
use tracing::debug;

use crate::debounce::Debounce;
use crate::providers::SearchProvider;

/// Validate a composed draft and encode it for navigation.
///
/// The returned string is the navigation parameter for the results view. On
/// error nothing is persisted, no navigation happens, and the message is
/// surfaced to the user while they correct the draft.
pub fn submit(draft: JoinedDraft) -> Result<String, ValidationError> {
    let query = validate(draft)?;
    Ok(codec::encode(&query))
}

/// One displayed result row plus its engagement state.
#[derive(Debug, Clone, Serialize)]
pub struct ResultRow {
    #[serde(flatten)]
    pub detail: WebpageDetail,
    pub score: f64,
    pub clicked: bool,
    #[serde(rename = "likeState")]
    pub like_state: LikeState,
}

impl ResultRow {
    fn has_signal(&self) -> bool {
        self.like_state == LikeState::Liked || self.clicked
    }

    fn outcome(&self) -> WebpageOutcome {
        WebpageOutcome {
            detail: self.detail.clone(),
            relevance: u8::from(self.has_signal()),
            clicked: self.clicked,
            like_state: self.like_state,
        }
    }
}

/// State of one results view, from arrival to the last amendment.
///
/// Opening a session with a decodable parameter runs the search, records a
/// history entry with no outcomes, and retains the entry's index for the
/// view's lifetime. Engagement changes restart the amendment timer; each
/// settled burst overwrites the retained entry wholesale with the
/// positive-signal subset of the current rows.
pub struct SearchSession {
    query: Option<SearchQuery>,
    rows: Vec<ResultRow>,
    entry: Option<HistoryEntry>,
    index: Option<usize>,
    amend: Debounce,
}

impl SearchSession {
    /// Open a results view for an incoming navigation parameter.
    ///
    /// An absent or undecodable parameter yields an idle session that
    /// renders the empty/default state; nothing is recorded for it.
    pub fn open(
        param: Option<&str>,
        provider: &dyn SearchProvider,
        store: &mut HistoryStore,
    ) -> Result<Self, StoreError> {
        let Some(query) = param.and_then(codec::decode) else {
            return Ok(Self::idle());
        };

        let snapshot = store.entries()?.to_vec();
        let response = provider.search(&query, &snapshot);
        let rows = response
            .webpages
            .into_iter()
            .map(|(detail, score)| ResultRow {
                detail,
                score,
                clicked: false,
                like_state: LikeState::None,
            })
            .collect();

        let entry = HistoryEntry::new(
            query.clone(),
            response.original_query_vector,
            response.modified_query_vector,
        );
        let index = store.append(entry.clone())?;
        debug!(index, kind = ?query.kind(), "search recorded");

        Ok(Self {
            query: Some(query),
            rows,
            entry: Some(entry),
            index: Some(index),
            amend: Debounce::default(),
        })
    }

    fn idle() -> Self {
        Self {
            query: None,
            rows: Vec::new(),
            entry: None,
            index: None,
            amend: Debounce::default(),
        }
    }

    /// Whether the session opened without a usable query.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.query.is_none()
    }

    /// The query this view is showing results for.
    #[must_use]
    pub fn query(&self) -> Option<&SearchQuery> {
        self.query.as_ref()
    }

    /// The displayed rows, in rank order.
    #[must_use]
    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    /// The store index retained at append time.
    #[must_use]
    pub fn history_index(&self) -> Option<usize> {
        self.index
    }

    /// Record a click state change and restart the amendment timer.
    pub fn set_clicked(&mut self, row: usize, clicked: bool, now: Instant) {
        let Some(row) = self.rows.get_mut(row) else {
            return;
        };
        row.clicked = clicked;
        self.amend.schedule(now);
    }

    /// Record a like/dislike change and restart the amendment timer.
    pub fn set_like_state(&mut self, row: usize, like_state: LikeState, now: Instant) {
        let Some(row) = self.rows.get_mut(row) else {
            return;
        };
        row.like_state = like_state;
        self.amend.schedule(now);
    }

    /// Flush a settled engagement burst into the store.
    ///
    /// Call from the event loop. Returns `true` when an amendment write
    /// happened; at most one write occurs per settled burst, reflecting the
    /// rows as of the last change.
    pub fn pump(&mut self, now: Instant, store: &mut HistoryStore) -> Result<bool, StoreError> {
        if !self.amend.fire(now) {
            return Ok(false);
        }
        let (Some(entry), Some(index)) = (self.entry.as_ref(), self.index) else {
            return Ok(false);
        };

        let webpages = self
            .rows
            .iter()
            .filter(|row| row.has_signal())
            .map(ResultRow::outcome)
            .collect();
        let amended = HistoryEntry {
            webpages,
            ..entry.clone()
        };
        store.update_at(index, amended)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use retrace_history::{BlobStore, HistoryStore, MemoryBlob};
    use retrace_model::{JoinMode, QueryKind, SingleQuery};

    use super::*;
    use crate::debounce::DEBOUNCE_DELAY;
    use crate::providers::StaticProvider;

    fn draft(texts: &[&str]) -> JoinedDraft {
        JoinedDraft {
            mode: JoinMode::Merged,
            queries: texts.iter().map(|text| SingleQuery::from_text(*text)).collect(),
        }
    }

    fn stored_entries(blob: &MemoryBlob) -> Vec<HistoryEntry> {
        let contents = blob.read().expect("read").unwrap_or_default();
        serde_json::from_str(&contents).expect("blob parses")
    }

    #[test]
    fn submit_encodes_the_validated_query() {
        let param = submit(draft(&["cats"])).expect("valid draft");
        assert_eq!(
            codec::decode(&param),
            Some(SearchQuery::Simple {
                query: "cats".into()
            })
        );
    }

    #[test]
    fn submit_surfaces_validation_errors() {
        let err = submit(draft(&[])).unwrap_err();
        assert_eq!(err.to_string(), "at least 1 query required");
    }

    #[test]
    fn missing_parameter_opens_an_idle_session() {
        let mut store = HistoryStore::new(MemoryBlob::new());
        let session =
            SearchSession::open(None, &StaticProvider, &mut store).expect("open");
        assert!(session.is_idle());
        assert!(session.rows().is_empty());
        assert_eq!(store.len().expect("len"), 0);
    }

    #[test]
    fn undecodable_parameter_opens_an_idle_session() {
        let mut store = HistoryStore::new(MemoryBlob::new());
        let session = SearchSession::open(Some("not json"), &StaticProvider, &mut store)
            .expect("open");
        assert!(session.is_idle());
        assert_eq!(store.len().expect("len"), 0);
    }

    #[test]
    fn opening_records_an_entry_with_no_outcomes() {
        let blob = MemoryBlob::new();
        let mut store = HistoryStore::new(blob.clone());
        let param = submit(draft(&["cats"])).expect("valid draft");

        let session = SearchSession::open(Some(&param), &StaticProvider, &mut store)
            .expect("open");
        assert!(!session.is_idle());
        assert_eq!(session.history_index(), Some(0));
        assert_eq!(session.rows().len(), 1);

        let entries = stored_entries(&blob);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind(), QueryKind::Simple);
        assert!(entries[0].webpages.is_empty());
    }

    #[test]
    fn burst_of_changes_amends_exactly_once_with_final_state() {
        let blob = MemoryBlob::new();
        let mut store = HistoryStore::new(blob.clone());
        let param = submit(draft(&["cats"])).expect("valid draft");
        let mut session = SearchSession::open(Some(&param), &StaticProvider, &mut store)
            .expect("open");

        let base = Instant::now();
        let step = Duration::from_millis(50);
        session.set_clicked(0, true, base);
        session.set_like_state(0, LikeState::Liked, base + step);
        session.set_like_state(0, LikeState::Disliked, base + step * 2);
        session.set_clicked(0, false, base + step * 3);
        session.set_clicked(0, true, base + step * 4);

        // Quiescence has not been reached relative to the last change.
        assert!(!session
            .pump(base + step * 4 + Duration::from_millis(499), &mut store)
            .expect("pump"));

        assert!(session
            .pump(base + step * 4 + DEBOUNCE_DELAY, &mut store)
            .expect("pump"));
        // The burst settled; nothing further fires.
        assert!(!session
            .pump(base + Duration::from_secs(60), &mut store)
            .expect("pump"));

        let entries = stored_entries(&blob);
        assert_eq!(entries[0].webpages.len(), 1);
        let outcome = &entries[0].webpages[0];
        assert!(outcome.clicked);
        assert_eq!(outcome.like_state, LikeState::Disliked);
        assert_eq!(outcome.relevance, 1);
    }

    #[test]
    fn amendment_drops_rows_without_signal() {
        let blob = MemoryBlob::new();
        let mut store = HistoryStore::new(blob.clone());
        let param = submit(draft(&["cats"])).expect("valid draft");
        let mut session = SearchSession::open(Some(&param), &StaticProvider, &mut store)
            .expect("open");

        let base = Instant::now();
        session.set_clicked(0, true, base);
        session.set_clicked(0, false, base + Duration::from_millis(10));

        assert!(session
            .pump(base + Duration::from_millis(10) + DEBOUNCE_DELAY, &mut store)
            .expect("pump"));

        // The only row lost its signal, so the stored subset is empty.
        let entries = stored_entries(&blob);
        assert!(entries[0].webpages.is_empty());
    }

    #[test]
    fn joined_drafts_run_against_the_joined_flow() {
        let mut store = HistoryStore::new(MemoryBlob::new());
        let param = submit(draft(&["cats", "dogs"])).expect("valid draft");
        let session = SearchSession::open(Some(&param), &StaticProvider, &mut store)
            .expect("open");
        assert_eq!(
            session.query().map(SearchQuery::kind),
            Some(QueryKind::Merged)
        );
    }
}
