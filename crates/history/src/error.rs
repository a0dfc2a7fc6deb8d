use thiserror::Error;

/// Errors that can occur while reading or mutating the history store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing blob could not be read or written.
    #[error("history blob I/O failed")]
    Io(#[from] std::io::Error),

    /// The persisted blob does not deserialize as a history list. There is
    /// no recovery path: the caller decides whether to surface or reset.
    #[error("history blob is corrupt")]
    Corrupt(#[source] serde_json::Error),

    /// The in-memory list failed to serialize for write-back.
    #[error("failed to serialize history")]
    Serialize(#[source] serde_json::Error),

    /// `update_at` addressed an index that was never assigned by `append`.
    #[error("history index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
}
