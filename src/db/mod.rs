//! Persistence for bird records.
//!
//! [`BirdStore`] is the only seam the web layer talks to. [`SqliteStore`] is
//! the production backend; [`MemoryStore`] keeps records in a `Vec` and backs
//! tests and `serve --in-memory`.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::path::PathBuf;

use thiserror::Error;

use crate::models::{Bird, NewBird};

/// Errors returned by a [`BirdStore`]. Engine errors are carried as-is.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open database at {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("query failed: {0}")]
    Query(#[from] rusqlite::Error),
    #[error("store is closed")]
    Closed,
    #[error("store lock poisoned")]
    Poisoned,
    #[error("blocking store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Storage operations for bird records.
///
/// Every method issues at most one statement against the backend. No method
/// wraps several statements in a transaction.
pub trait BirdStore: Send + Sync {
    /// Every record, in whatever order the backend returns them.
    fn list_all(&self) -> Result<Vec<Bird>>;

    /// Records whose sex flag equals `is_female`.
    fn list_by_flag(&self, is_female: bool) -> Result<Vec<Bird>>;

    /// Persist a new record and return it with its assigned id.
    fn insert(&self, candidate: &NewBird) -> Result<Bird>;

    /// Overwrite name, family and flag of the record with `id`.
    ///
    /// Returns `Ok(())` even when no record has that id.
    fn update(&self, id: i64, replacement: &NewBird) -> Result<()>;

    /// Release the backend. Later calls fail with [`StoreError::Closed`].
    fn close(&self) -> Result<()>;
}
