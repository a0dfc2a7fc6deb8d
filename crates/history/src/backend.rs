//! Persistence seam for the serialized history blob.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::StoreError;

/// One opaque string blob, scoped to the client.
///
/// The trait deliberately offers nothing beyond whole-blob get/set: the
/// store re-serializes the full entry list on every write, and concurrent
/// writers follow last-writer-wins with no merge.
pub trait BlobStore {
    /// Read the entire blob, or `None` when nothing has been stored yet.
    fn read(&self) -> Result<Option<String>, StoreError>;

    /// Replace the entire blob.
    fn write(&self, blob: &str) -> Result<(), StoreError>;
}

/// Blob persisted as a single file on disk.
#[derive(Debug, Clone)]
pub struct FileBlob {
    path: PathBuf,
}

impl FileBlob {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BlobStore for FileBlob {
    fn read(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(blob) => Ok(Some(blob)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    fn write(&self, blob: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, blob)?;
        Ok(())
    }
}

/// Shared in-memory blob for tests and ephemeral sessions.
///
/// Clones share the same cell, so a test can hand one handle to the store
/// and keep another to inspect what was written.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlob {
    cell: Arc<Mutex<Option<String>>>,
}

impl MemoryBlob {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current contents.
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.cell
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl BlobStore for MemoryBlob {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self
            .cell
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn write(&self, blob: &str) -> Result<(), StoreError> {
        *self.cell.lock().unwrap_or_else(PoisonError::into_inner) = Some(blob.to_string());
        Ok(())
    }
}
