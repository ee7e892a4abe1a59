//! In-memory blob store for tests.

use std::collections::HashMap;
use std::io;

use super::{BlobStore, Result, StorageError};

/// A blob store backed by a map, counting writes.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: HashMap<String, String>,
    writes: usize,
    fail_writes: bool,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with `blob` under `key`.
    pub fn with_blob(key: &str, blob: &str) -> Self {
        let mut store = Self::new();
        store.blobs.insert(key.to_string(), blob.to_string());
        store
    }

    /// A store whose writes always fail.
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Number of successful `set_item` calls.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn blob(&self, key: &str) -> Option<&str> {
        self.blobs.get(key).map(String::as_str)
    }
}

impl BlobStore for MemoryBlobStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, blob: &str) -> Result<()> {
        if self.fail_writes {
            return Err(StorageError::Io(io::Error::other("disk full")));
        }
        self.blobs.insert(key.to_string(), blob.to_string());
        self.writes += 1;
        Ok(())
    }
}
