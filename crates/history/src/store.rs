//! The ordered, index-addressed log of past searches.

use retrace_model::{HistoryEntry, QueryKind, SearchQuery};
use tracing::debug;

use crate::backend::BlobStore;
use crate::error::StoreError;

/// Cached view over the persisted history list.
///
/// The blob is read once, on first access, and served from the cache for
/// the rest of the session; only local writes refresh it. Every mutation
/// re-serializes the full list and writes it back through the backend, so a
/// concurrent session can lose updates to this one (last writer wins). A
/// single writer at a time is enforced by `&mut` access.
pub struct HistoryStore {
    backend: Box<dyn BlobStore>,
    cache: Option<Vec<HistoryEntry>>,
}

impl HistoryStore {
    /// Wrap a persistence backend. Nothing is read until first access.
    #[must_use]
    pub fn new(backend: impl BlobStore + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            cache: None,
        }
    }

    /// All recorded entries in append order.
    pub fn entries(&mut self) -> Result<&[HistoryEntry], StoreError> {
        self.load().map(|entries| entries.as_slice())
    }

    /// Number of recorded entries.
    pub fn len(&mut self) -> Result<usize, StoreError> {
        self.load().map(|entries| entries.len())
    }

    /// Whether no searches have been recorded yet.
    pub fn is_empty(&mut self) -> Result<bool, StoreError> {
        self.load().map(|entries| entries.is_empty())
    }

    /// Append an entry and return the index that now identifies it.
    ///
    /// The index equals the list length before the call and stays valid for
    /// the lifetime of the store; entries are never deleted or evicted.
    pub fn append(&mut self, entry: HistoryEntry) -> Result<usize, StoreError> {
        let index = {
            let entries = self.load()?;
            entries.push(entry);
            entries.len() - 1
        };
        self.flush()?;
        debug!(index, "history entry appended");
        Ok(index)
    }

    /// Replace the entry at `index` wholesale.
    ///
    /// Amendments never merge with the stored copy; the caller supplies the
    /// complete replacement.
    pub fn update_at(&mut self, index: usize, entry: HistoryEntry) -> Result<(), StoreError> {
        {
            let entries = self.load()?;
            let len = entries.len();
            let Some(slot) = entries.get_mut(index) else {
                return Err(StoreError::IndexOutOfRange { index, len });
            };
            *slot = entry;
        }
        self.flush()?;
        debug!(index, "history entry amended");
        Ok(())
    }

    /// Stable-order subsequence of entries whose query tag is in `kinds`.
    pub fn filter_kinds(&mut self, kinds: &[QueryKind]) -> Result<Vec<HistoryEntry>, StoreError> {
        let entries = self.load()?;
        Ok(entries
            .iter()
            .filter(|entry| kinds.contains(&entry.kind()))
            .cloned()
            .collect())
    }

    fn load(&mut self) -> Result<&mut Vec<HistoryEntry>, StoreError> {
        if self.cache.is_none() {
            let entries = match self.backend.read()? {
                Some(blob) if !blob.trim().is_empty() => {
                    serde_json::from_str(&blob).map_err(StoreError::Corrupt)?
                }
                _ => Vec::new(),
            };
            debug!(entries = entries.len(), "history blob loaded");
            self.cache = Some(entries);
        }
        Ok(self.cache.get_or_insert_with(Vec::new))
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        let entries = self.cache.as_deref().unwrap_or(&[]);
        let blob = serde_json::to_string(entries).map_err(StoreError::Serialize)?;
        self.backend.write(&blob)
    }
}

/// Locate a previously stored entry equivalent to `candidate`.
///
/// Matching is exact structural equality over the canonical query
/// projection: the tag and the structural query fields. Timestamps, query
/// vectors, and recorded outcomes never influence the match.
#[must_use]
pub fn find_fingerprint(candidate: &SearchQuery, among: &[HistoryEntry]) -> Option<usize> {
    among.iter().position(|entry| entry.query == *candidate)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use retrace_model::{QueryVector, SingleQuery};

    use super::*;
    use crate::backend::{FileBlob, MemoryBlob};

    fn entry(text: &str) -> HistoryEntry {
        HistoryEntry::new(
            SearchQuery::Simple { query: text.into() },
            QueryVector::new(),
            QueryVector::new(),
        )
    }

    fn advanced_entry(term: &str) -> HistoryEntry {
        let mut single = SingleQuery::default();
        single.title_all.push((term.into(), 1.0));
        HistoryEntry::new(
            SearchQuery::Single(single),
            QueryVector::new(),
            QueryVector::new(),
        )
    }

    /// Backend that counts reads so load-once behaviour is observable.
    #[derive(Clone, Default)]
    struct CountingBlob {
        inner: MemoryBlob,
        reads: Arc<Mutex<usize>>,
    }

    impl BlobStore for CountingBlob {
        fn read(&self) -> Result<Option<String>, StoreError> {
            *self.reads.lock().expect("lock") += 1;
            self.inner.read()
        }

        fn write(&self, blob: &str) -> Result<(), StoreError> {
            self.inner.write(blob)
        }
    }

    #[test]
    fn append_assigns_sequential_indices() {
        let mut store = HistoryStore::new(MemoryBlob::new());
        for expected in 0..3 {
            let index = store.append(entry(&format!("q{expected}"))).expect("append");
            assert_eq!(index, expected);
        }
        assert_eq!(store.len().expect("len"), 3);
    }

    #[test]
    fn update_at_replaces_only_the_addressed_entry() {
        let mut store = HistoryStore::new(MemoryBlob::new());
        for text in ["a", "b", "c"] {
            store.append(entry(text)).expect("append");
        }

        store.update_at(1, entry("amended")).expect("update");

        let entries = store.entries().expect("entries");
        assert_eq!(
            entries[0].query,
            SearchQuery::Simple { query: "a".into() }
        );
        assert_eq!(
            entries[1].query,
            SearchQuery::Simple {
                query: "amended".into()
            }
        );
        assert_eq!(
            entries[2].query,
            SearchQuery::Simple { query: "c".into() }
        );
    }

    #[test]
    fn update_at_out_of_range_is_an_error() {
        let mut store = HistoryStore::new(MemoryBlob::new());
        store.append(entry("only")).expect("append");
        let err = store.update_at(3, entry("nope")).unwrap_err();
        match err {
            StoreError::IndexOutOfRange { index, len } => {
                assert_eq!(index, 3);
                assert_eq!(len, 1);
            }
            other => panic!("expected IndexOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn blob_is_read_once_per_session() {
        let backend = CountingBlob::default();
        let reads = Arc::clone(&backend.reads);
        let mut store = HistoryStore::new(backend);

        store.entries().expect("first load");
        store.entries().expect("cached");
        store.append(entry("q")).expect("append");
        store.filter_kinds(&[QueryKind::Simple]).expect("filter");

        assert_eq!(*reads.lock().expect("lock"), 1);
    }

    #[test]
    fn every_mutation_writes_the_full_list_back() {
        let blob = MemoryBlob::new();
        let mut store = HistoryStore::new(blob.clone());
        store.append(entry("persisted")).expect("append");

        let written = blob.contents().expect("blob written");
        let parsed: Vec<HistoryEntry> = serde_json::from_str(&written).expect("blob parses");
        assert_eq!(parsed.len(), 1);
        assert_eq!(
            parsed[0].query,
            SearchQuery::Simple {
                query: "persisted".into()
            }
        );
    }

    #[test]
    fn history_survives_across_sessions_on_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("history.json");

        let mut first = HistoryStore::new(FileBlob::new(&path));
        first.append(entry("first session")).expect("append");
        first.append(advanced_entry("atomics")).expect("append");

        let mut second = HistoryStore::new(FileBlob::new(&path));
        let entries = second.entries().expect("reload");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].kind(), QueryKind::Single);
    }

    #[test]
    fn corrupt_blob_surfaces_as_an_error() {
        let blob = MemoryBlob::new();
        blob.write("{ not a history list").expect("seed");
        let mut store = HistoryStore::new(blob);
        assert!(matches!(store.entries(), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn filter_kinds_keeps_append_order() {
        let mut store = HistoryStore::new(MemoryBlob::new());
        store.append(entry("one")).expect("append");
        store.append(advanced_entry("two")).expect("append");
        store.append(entry("three")).expect("append");

        let simple = store.filter_kinds(&[QueryKind::Simple]).expect("filter");
        assert_eq!(simple.len(), 2);
        assert_eq!(
            simple[0].query,
            SearchQuery::Simple { query: "one".into() }
        );
        assert_eq!(
            simple[1].query,
            SearchQuery::Simple {
                query: "three".into()
            }
        );

        let joined = store
            .filter_kinds(&[QueryKind::Merged, QueryKind::Subquery])
            .expect("filter");
        assert!(joined.is_empty());
    }

    #[test]
    fn fingerprint_matches_structure_not_metadata() {
        let mut store = HistoryStore::new(MemoryBlob::new());
        store.append(entry("cats")).expect("append");
        store.append(advanced_entry("dogs")).expect("append");

        let candidate = SearchQuery::Simple {
            query: "cats".into(),
        };
        let entries = store.entries().expect("entries");
        assert_eq!(find_fingerprint(&candidate, entries), Some(0));

        let mut single = SingleQuery::default();
        single.title_all.push(("dogs".into(), 1.0));
        assert_eq!(
            find_fingerprint(&SearchQuery::Single(single), entries),
            Some(1)
        );

        let unseen = SearchQuery::Simple {
            query: "ferrets".into(),
        };
        assert_eq!(find_fingerprint(&unseen, entries), None);
    }
}
