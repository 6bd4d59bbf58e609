//! Persistent storage for sleep sessions.
//!
//! One row per sleep cycle in a single `history` table. The column names
//! match the database files written by earlier sntrack releases.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use sntrack_platform::SleepAction;

/// A single sleep cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepSession {
    pub id: i64,
    pub bios_version: Option<String>,
    pub sleep_mode: Option<String>,
    /// Raw action text; rows written by other tools may hold unknown values.
    pub sleep_action: Option<String>,
    pub start_ts: i64,
    pub end_ts: Option<i64>,
    /// µWh
    pub start_energy: i64,
    /// µWh
    pub end_energy: Option<i64>,
}

impl SleepSession {
    pub fn is_closed(&self) -> bool {
        self.end_ts.is_some() && self.end_energy.is_some()
    }

    pub fn duration_secs(&self) -> Option<i64> {
        self.end_ts.map(|end| end - self.start_ts)
    }

    /// Energy consumed during sleep, in µWh.
    pub fn energy_used(&self) -> Option<i64> {
        self.end_energy.map(|end| self.start_energy - end)
    }

    pub fn action(&self) -> Option<SleepAction> {
        self.sleep_action.as_deref().and_then(|a| a.parse().ok())
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(SleepSession {
            id: row.get(0)?,
            bios_version: row.get(1)?,
            sleep_mode: row.get(2)?,
            sleep_action: row.get(3)?,
            start_ts: row.get::<_, Option<i64>>(4)?.unwrap_or(0),
            end_ts: row.get(5)?,
            start_energy: row.get::<_, Option<i64>>(6)?.unwrap_or(0),
            end_energy: row.get(7)?,
        })
    }
}

/// Values recorded when a session is opened
#[derive(Debug, Clone)]
pub struct NewSession {
    pub bios_version: Option<String>,
    pub sleep_mode: Option<String>,
    pub sleep_action: SleepAction,
    pub start_ts: i64,
    pub start_energy: i64,
}

/// Errors that can occur during session storage operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid session marker content: {0:?}")]
    InvalidMarker(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

const SELECT_COLUMNS: &str =
    "SELECT id, bios_version, sleep_mode, sleep_action, t0, t1, e0, e1 FROM history";

/// Session storage backed by SQLite
pub struct SessionStore {
    conn: Connection,
    path: PathBuf,
}

impl SessionStore {
    /// Open or create the session database, creating parent directories.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA busy_timeout=5000;")?;

        let store = Self {
            conn,
            path: path.to_path_buf(),
        };
        store.initialize_schema()?;

        tracing::debug!(path = %store.path.display(), "Opened session database");
        Ok(store)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
            path: PathBuf::from(":memory:"),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn initialize_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS history (
                id INTEGER PRIMARY KEY,
                bios_version TEXT,
                sleep_mode TEXT,
                sleep_action TEXT,
                t0 INTEGER, t1 INTEGER,
                e0 INTEGER, e1 INTEGER
            );
            "#,
        )?;
        Ok(())
    }

    /// Insert an open session and return its id
    pub fn insert_session(&self, session: &NewSession) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO history (bios_version, sleep_mode, sleep_action, t0, e0)
             VALUES (?, ?, ?, ?, ?)",
            params![
                session.bios_version,
                session.sleep_mode,
                session.sleep_action.label(),
                session.start_ts,
                session.start_energy,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Stamp the end of a session.
    ///
    /// Returns false when no open session with this id exists, which keeps
    /// the end fields write-once.
    pub fn close_session(&self, id: i64, end_ts: i64, end_energy: i64) -> Result<bool> {
        let updated = self.conn.execute(
            "UPDATE history SET t1 = ?, e1 = ? WHERE id = ? AND t1 IS NULL AND e1 IS NULL",
            params![end_ts, end_energy, id],
        )?;
        Ok(updated == 1)
    }

    pub fn get_session(&self, id: i64) -> Result<Option<SleepSession>> {
        let session = self
            .conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?"),
                [id],
                SleepSession::from_row,
            )
            .optional()?;
        Ok(session)
    }

    /// All sessions, oldest first
    pub fn get_sessions(&self) -> Result<Vec<SleepSession>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY id ASC"))?;

        let sessions = stmt
            .query_map([], SleepSession::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(sessions)
    }

    pub fn session_count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM history", [], |row| row.get(0))?;
        Ok(count)
    }
}
