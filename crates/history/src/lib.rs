//! Durable, per-client log of past searches.
//!
//! The store keeps an ordered list of [`HistoryEntry`](retrace_model::HistoryEntry)
//! values behind an injected blob backend: the whole list is the unit of
//! read and write, entries are addressed by the index assigned at append
//! time, and amendments replace an entry wholesale.

mod backend;
mod error;
mod store;

pub use backend::{BlobStore, FileBlob, MemoryBlob};
pub use error::StoreError;
pub use store::{HistoryStore, find_fingerprint};
