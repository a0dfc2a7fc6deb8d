use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use retrace::providers::StaticProvider;
use retrace::session::{ResultRow, SearchSession, submit};
use retrace::suggest::SuggestionInput;
use retrace_history::{FileBlob, HistoryStore};
use retrace_model::{HistoryEntry, JoinedDraft, QueryKind, QuerySuggestions, SearchQuery};
use serde::Serialize;

use crate::settings::Settings;

/// Everything one search run produced, ready for printing.
#[derive(Debug, Serialize)]
pub(crate) struct SearchReport {
    pub(crate) query: Option<SearchQuery>,
    pub(crate) history_index: Option<usize>,
    pub(crate) results: Vec<ResultRow>,
}

/// Owns the store and provider for the duration of one CLI invocation.
pub(crate) struct Workflow {
    store: HistoryStore,
    provider: StaticProvider,
    debounce: Duration,
}

impl Workflow {
    pub(crate) fn from_settings(settings: Settings) -> Self {
        Self {
            store: HistoryStore::new(FileBlob::new(settings.history_path)),
            provider: StaticProvider,
            debounce: settings.debounce,
        }
    }

    /// Submit a free-text draft, open the results view, and record it.
    pub(crate) fn run_search(&mut self, text: String) -> Result<SearchReport> {
        let draft = JoinedDraft::from_query(Some(SearchQuery::Simple { query: text }));
        let param = submit(draft)?;
        let session = SearchSession::open(Some(&param), &self.provider, &mut self.store)
            .context("failed to record the search in history")?;

        Ok(SearchReport {
            query: session.query().cloned(),
            history_index: session.history_index(),
            results: session.rows().to_vec(),
        })
    }

    /// List recorded searches, filtered to `kinds` (all kinds when empty).
    pub(crate) fn run_history(&mut self, kinds: Vec<QueryKind>) -> Result<Vec<HistoryEntry>> {
        let kinds = if kinds.is_empty() {
            QueryKind::ALL.to_vec()
        } else {
            kinds
        };
        self.store
            .filter_kinds(&kinds)
            .context("failed to load the search history")
    }

    /// Run one settled suggestion fetch for `text`.
    pub(crate) fn run_suggest(&mut self, text: String) -> Result<QuerySuggestions> {
        let mut input = SuggestionInput::new(self.debounce);
        let now = Instant::now();
        input.set_input(text, now);
        let suggestions = input
            .pump(now + self.debounce, &self.provider, &mut self.store)
            .context("failed to load the suggestion context")?;
        Ok(suggestions.unwrap_or_default())
    }
}
