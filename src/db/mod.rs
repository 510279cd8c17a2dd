//! Row store for profiles, mood check-ins and journal entries.
//!
//! This module provides SQLite database operations for the three record kinds
//! the app persists. Every row belongs to a user identity and every query is
//! filtered by it. It uses connection pooling via r2d2.
//!
//! # Module Structure
//!
//! - `schema`: Table definitions and schema initialization
//! - `profiles`: Profile and preference rows
//! - `moods`: Daily mood check-ins (one per user per day)
//! - `journal`: Journal entry CRUD
//!
//! # Example
//!
//! ```no_run
//! use moodwell::db::Database;
//! use std::path::Path;
//!
//! let db = Database::open(Path::new("/tmp/moodwell.db"))?;
//! db.initialize_schema()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod journal;
pub mod moods;
pub mod profiles;
pub mod schema;

use crate::errors::{AppResult, DatabaseError};
use chrono::{NaiveDate, SecondsFormat, Utc};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use uuid::Uuid;

/// Type alias for a pooled SQLite connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Database handle with connection pooling.
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

impl Database {
    /// Opens or creates the SQLite database, creating its parent directory
    /// if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The parent directory cannot be created
    /// - Database file cannot be opened
    /// - Connection pool cannot be initialized
    pub fn open(db_path: &Path) -> AppResult<Self> {
        debug!("Opening database at: {:?}", db_path);

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let manager = SqliteConnectionManager::file(db_path)
            .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));
        let pool = Pool::builder()
            .max_size(4)
            .build(manager)
            .map_err(DatabaseError::Pool)?;

        info!("Database opened successfully");
        Ok(Database { pool })
    }

    /// Gets a connection from the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if no connection is available or the pool is exhausted.
    pub fn get_conn(&self) -> AppResult<PooledConnection> {
        self.pool.get().map_err(|e| DatabaseError::Pool(e).into())
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent and safe to call multiple times.
    ///
    /// # Errors
    ///
    /// Returns an error if schema creation fails.
    pub fn initialize_schema(&self) -> AppResult<()> {
        let conn = self.get_conn()?;
        schema::create_tables(&conn)?;
        info!("Database schema initialized");
        Ok(())
    }
}

/// Current time as a fixed-width RFC 3339 string, so that text ordering
/// matches chronological ordering.
pub(crate) fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Wraps a column decoding failure in the error rusqlite expects from row mappers.
pub(crate) fn conversion_error(
    column: usize,
    err: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, err.into())
}

pub(crate) fn parse_uuid(column: usize, raw: &str) -> Result<Uuid, rusqlite::Error> {
    Uuid::parse_str(raw).map_err(|e| conversion_error(column, e))
}

pub(crate) fn parse_date(column: usize, raw: &str) -> Result<NaiveDate, rusqlite::Error> {
    NaiveDate::parse_from_str(raw, crate::constants::DATE_FORMAT_ISO)
        .map_err(|e| conversion_error(column, e))
}

/// Number of rows in `table` owned by `user_id`. Used by tests and `whoami`.
pub fn count_rows(conn: &Connection, table: schema::Table, user_id: Uuid) -> AppResult<usize> {
    let sql = format!(
        "SELECT COUNT(*) FROM {} WHERE {} = ?1",
        table.name(),
        table.owner_column()
    );
    let count: i64 = conn
        .query_row(&sql, [user_id.to_string()], |row| row.get(0))
        .map_err(DatabaseError::Sqlite)?;
    Ok(count as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_database_open_and_connect() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let db = Database::open(&db_path).unwrap();
        let conn = db.get_conn().unwrap();

        let result: i32 = conn
            .query_row("SELECT 1 + 1", [], |row| row.get(0))
            .unwrap();
        assert_eq!(result, 2);
    }

    #[test]
    fn test_open_creates_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested").join("dir").join("test.db");

        let db = Database::open(&db_path).unwrap();
        db.initialize_schema().unwrap();
        assert!(db_path.exists());
    }

    #[test]
    fn test_initialize_schema_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::open(&temp_dir.path().join("test.db")).unwrap();

        db.initialize_schema().unwrap();
        db.initialize_schema().unwrap();
    }

    #[test]
    fn test_foreign_keys_enabled_on_every_connection() {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::open(&temp_dir.path().join("test.db")).unwrap();
        let conn = db.get_conn().unwrap();

        let enabled: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn test_timestamps_are_fixed_width() {
        let a = timestamp_now();
        let b = timestamp_now();
        assert_eq!(a.len(), b.len());
        assert!(a <= b);
        assert!(a.ends_with('Z'));
    }
}
