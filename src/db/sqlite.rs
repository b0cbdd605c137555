use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, params};
use tracing::{debug, warn};

use super::{BirdStore, Result, StoreError};
use crate::models::{Bird, NewBird};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS pajaros (
        id      INTEGER PRIMARY KEY AUTOINCREMENT,
        nombre  TEXT NOT NULL,
        familia TEXT NOT NULL,
        hembra  INTEGER NOT NULL
    );
";

/// Column order here must match `row_to_bird`.
const SELECT_BIRDS: &str = "SELECT id, nombre, familia, hembra FROM pajaros";

/// SQLite-backed store. The connection is serialized behind a mutex.
pub struct SqliteStore {
    conn: Mutex<Option<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the database at the given path and ensure the table exists.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        debug!(path = %path.display(), "opened sqlite database");
        Self::from_connection(conn)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(SqliteStore {
            conn: Mutex::new(Some(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Option<Connection>>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    fn query_birds(&self, sql: &str, params: impl rusqlite::Params) -> Result<Vec<Bird>> {
        let guard = self.lock()?;
        let conn = guard.as_ref().ok_or(StoreError::Closed)?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params, row_to_bird)?;

        let mut birds = Vec::new();
        for row in rows {
            birds.push(row?);
        }
        Ok(birds)
    }
}

impl BirdStore for SqliteStore {
    fn list_all(&self) -> Result<Vec<Bird>> {
        self.query_birds(SELECT_BIRDS, [])
    }

    fn list_by_flag(&self, is_female: bool) -> Result<Vec<Bird>> {
        self.query_birds(
            &format!("{SELECT_BIRDS} WHERE hembra = ?1"),
            params![is_female],
        )
    }

    fn insert(&self, candidate: &NewBird) -> Result<Bird> {
        let guard = self.lock()?;
        let conn = guard.as_ref().ok_or(StoreError::Closed)?;
        let bird = conn.query_row(
            "INSERT INTO pajaros (nombre, familia, hembra) VALUES (?1, ?2, ?3)
             RETURNING id, nombre, familia, hembra",
            params![candidate.name, candidate.family, candidate.is_female],
            row_to_bird,
        )?;
        Ok(bird)
    }

    fn update(&self, id: i64, replacement: &NewBird) -> Result<()> {
        let guard = self.lock()?;
        let conn = guard.as_ref().ok_or(StoreError::Closed)?;
        let changed = conn.execute(
            "UPDATE pajaros SET nombre = ?1, familia = ?2, hembra = ?3 WHERE id = ?4",
            params![
                replacement.name,
                replacement.family,
                replacement.is_female,
                id
            ],
        )?;
        if changed == 0 {
            warn!(id, "update matched no bird");
        }
        Ok(())
    }

    fn close(&self) -> Result<()> {
        let mut guard = self.lock()?;
        match guard.take() {
            Some(conn) => conn.close().map_err(|(_, e)| StoreError::Query(e)),
            None => Ok(()),
        }
    }
}

/// Positional mapping: 0 id, 1 nombre, 2 familia, 3 hembra.
fn row_to_bird(row: &rusqlite::Row) -> rusqlite::Result<Bird> {
    Ok(Bird {
        id: row.get(0)?,
        name: row.get(1)?,
        family: row.get(2)?,
        is_female: row.get(3)?,
    })
}
