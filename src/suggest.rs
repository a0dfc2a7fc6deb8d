//! Debounced fetch-as-you-type suggestion input.

use std::time::{Duration, Instant};

use retrace_history::{HistoryStore, StoreError};
use retrace_model::QuerySuggestions;

use crate::debounce::Debounce;
use crate::providers::SuggestionProvider;

/// Tracks the text being typed and issues at most one suggestion request
/// per settled burst of keystrokes.
///
/// Each keystroke cancels any pending timer and starts a new one; only the
/// request for the most recent input value is ever issued. The seam is
/// synchronous, so a stale response can never land after a newer one.
pub struct SuggestionInput {
    text: String,
    timer: Debounce,
}

impl SuggestionInput {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            text: String::new(),
            timer: Debounce::new(delay),
        }
    }

    /// Record the latest input value and restart the quiescence timer.
    ///
    /// Blank input clears any pending request instead of scheduling one;
    /// the caller renders the empty suggestion set immediately.
    pub fn set_input(&mut self, text: impl Into<String>, now: Instant) {
        self.text = text.into();
        if self.text.trim().is_empty() {
            self.timer.cancel();
        } else {
            self.timer.schedule(now);
        }
    }

    /// The most recent input value.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether a request is waiting for the burst to settle.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.timer.is_pending()
    }

    /// Issue the pending request once the burst has settled.
    ///
    /// Returns `Some` with the collaborator's payload when a request was
    /// issued this poll, `None` otherwise.
    pub fn pump(
        &mut self,
        now: Instant,
        provider: &dyn SuggestionProvider,
        store: &mut HistoryStore,
    ) -> Result<Option<QuerySuggestions>, StoreError> {
        if !self.timer.fire(now) {
            return Ok(None);
        }
        let snapshot = store.entries()?.to_vec();
        Ok(Some(provider.suggest(&self.text, &snapshot)))
    }
}

impl Default for SuggestionInput {
    fn default() -> Self {
        Self::new(crate::debounce::DEBOUNCE_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use retrace_history::MemoryBlob;
    use retrace_model::HistoryEntry;

    use super::*;
    use crate::debounce::DEBOUNCE_DELAY;

    /// Provider that records every issued request.
    #[derive(Default)]
    struct RecordingProvider {
        requests: RefCell<Vec<String>>,
    }

    impl SuggestionProvider for RecordingProvider {
        fn suggest(&self, input: &str, _history: &[HistoryEntry]) -> QuerySuggestions {
            self.requests.borrow_mut().push(input.to_string());
            QuerySuggestions::default()
        }
    }

    #[test]
    fn keystroke_burst_issues_one_request_with_the_final_text() {
        let provider = RecordingProvider::default();
        let mut store = HistoryStore::new(MemoryBlob::new());
        let mut input = SuggestionInput::default();

        let base = Instant::now();
        let step = Duration::from_millis(80);
        for (i, text) in ["r", "ru", "rus", "rust"].iter().enumerate() {
            input.set_input(*text, base + step * i as u32);
            assert!(
                input
                    .pump(base + step * i as u32, &provider, &mut store)
                    .expect("pump")
                    .is_none()
            );
        }

        let settled = base + step * 3 + DEBOUNCE_DELAY;
        assert!(input.pump(settled, &provider, &mut store).expect("pump").is_some());
        assert_eq!(*provider.requests.borrow(), vec!["rust".to_string()]);

        // Nothing further fires without new input.
        assert!(
            input
                .pump(settled + DEBOUNCE_DELAY, &provider, &mut store)
                .expect("pump")
                .is_none()
        );
    }

    #[test]
    fn blank_input_cancels_the_pending_request() {
        let provider = RecordingProvider::default();
        let mut store = HistoryStore::new(MemoryBlob::new());
        let mut input = SuggestionInput::default();

        let base = Instant::now();
        input.set_input("rust", base);
        input.set_input("   ", base + Duration::from_millis(100));

        assert!(!input.is_pending());
        assert!(
            input
                .pump(base + Duration::from_secs(5), &provider, &mut store)
                .expect("pump")
                .is_none()
        );
        assert!(provider.requests.borrow().is_empty());
    }
}
