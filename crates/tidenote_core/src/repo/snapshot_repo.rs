//! Snapshot repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the key-value read/write pair the notes manager persists through.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Writes overwrite the stored value wholesale; there are no partial writes.
//! - One process is the only writer and reader of a given store.

use crate::store::StoreError;
use rusqlite::{params, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for snapshot persistence operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying store failure.
    Store(StoreError),
    /// The connection is missing required schema objects.
    MissingSchema(&'static str),
    /// The backing storage cannot be reached at all.
    Unavailable(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::MissingSchema(table) => write!(f, "missing required table: {table}"),
            Self::Unavailable(reason) => write!(f, "storage unavailable: {reason}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::MissingSchema(_) | Self::Unavailable(_) => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Store(StoreError::Sqlite(value))
    }
}

/// Key-value persistence contract for serialized snapshots.
pub trait SnapshotRepository {
    /// Reads the stored value for `key`, `None` when absent.
    fn read_snapshot(&self, key: &str) -> RepoResult<Option<String>>;
    /// Overwrites the stored value for `key` wholesale.
    fn write_snapshot(&mut self, key: &str, value: &str) -> RepoResult<()>;
}

/// SQLite-backed snapshot repository over a migrated connection.
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        if !table_exists(conn, "kv_snapshots")? {
            return Err(RepoError::MissingSchema("kv_snapshots"));
        }
        Ok(Self { conn })
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn read_snapshot(&self, key: &str) -> RepoResult<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM kv_snapshots WHERE key = ?1;")?;
        let mut rows = stmt.query([key])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(row.get("value")?));
        }
        Ok(None)
    }

    fn write_snapshot(&mut self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_snapshots (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
