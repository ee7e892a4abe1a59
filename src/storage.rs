//! Local persistence for workouts.
//!
//! The substrate is a key-value blob store. The production store keeps one
//! table in a single `SQLite` file under the data directory:
//!
//! ```text
//! <root>/
//!   mapty.sqlite     # blobs(key TEXT PRIMARY KEY, value TEXT)
//! ```
//!
//! [`WorkoutArchive`] layers the workout format on top: the whole ordered
//! collection, serialized as JSON under the `workouts` key.

mod archive;
#[cfg(test)]
mod memory;

use std::{fs, io, path::Path, path::PathBuf};

use rusqlite::{Connection, OptionalExtension};

pub use archive::WorkoutArchive;
#[cfg(test)]
pub use archive::WORKOUTS_KEY;
#[cfg(test)]
pub use memory::MemoryBlobStore;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, StorageError>;

/// Stores and retrieves serialized blobs by key.
pub trait BlobStore {
    /// The blob stored under `key`, or `None` if nothing was ever stored.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Stores `blob` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, blob: &str) -> Result<()>;
}

/// `SQLite`-backed blob store.
pub struct SqliteBlobStore {
    conn: Connection,
}

impl SqliteBlobStore {
    /// File name of the database inside the data directory.
    pub const FILE_NAME: &'static str = "mapty.sqlite";

    /// Opens (or creates) the blob database in `root`.
    ///
    /// The directory is created if it doesn't exist.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        fs::create_dir_all(root)?;
        Self::init(Connection::open(root.join(Self::FILE_NAME))?)
    }

    /// An in-memory store that vanishes when dropped.
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    /// Returns the default data directory: `~/.mapty/`.
    pub fn default_root() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".mapty"))
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS blobs (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )?;
        Ok(Self { conn })
    }
}

impl BlobStore for SqliteBlobStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let blob = self
            .conn
            .query_row("SELECT value FROM blobs WHERE key = ?1", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(blob)
    }

    fn set_item(&mut self, key: &str, blob: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO blobs (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![key, blob],
        )?;
        Ok(())
    }
}
