//! Database schema definitions and initialization.
//!
//! Three tables, all keyed by user identity: `profiles`, `mood_entries` and
//! `journal_entries`. Mood and journal rows reference their profile and are
//! removed with it.

use crate::errors::{AppResult, DatabaseError};
use rusqlite::Connection;
use tracing::debug;

/// Current schema version.
///
/// Increment this whenever schema changes are made to support future migrations.
pub const SCHEMA_VERSION: i32 = 1;

/// The user-owned tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Profiles,
    MoodEntries,
    JournalEntries,
}

impl Table {
    pub fn name(self) -> &'static str {
        match self {
            Table::Profiles => "profiles",
            Table::MoodEntries => "mood_entries",
            Table::JournalEntries => "journal_entries",
        }
    }

    /// Column holding the owning user's id.
    pub fn owner_column(self) -> &'static str {
        match self {
            Table::Profiles => "id",
            Table::MoodEntries | Table::JournalEntries => "user_id",
        }
    }
}

/// Creates all database tables and indexes.
///
/// This function is idempotent - it uses `CREATE TABLE IF NOT EXISTS`
/// so it's safe to call multiple times.
///
/// # Errors
///
/// Returns an error if any DDL statement fails.
pub fn create_tables(conn: &Connection) -> AppResult<()> {
    debug!("Creating database tables");

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS profiles (
            id TEXT PRIMARY KEY,
            nickname TEXT,
            preferences TEXT NOT NULL DEFAULT '{}',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .map_err(DatabaseError::Sqlite)?;

    // One check-in per user per day
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS mood_entries (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            date TEXT NOT NULL,
            mood INTEGER NOT NULL CHECK(mood BETWEEN 1 AND 5),
            mood_emoji TEXT NOT NULL,
            note TEXT,
            ai_prompt TEXT,
            ai_response TEXT,
            created_at TEXT NOT NULL,
            FOREIGN KEY (user_id) REFERENCES profiles(id) ON DELETE CASCADE,
            UNIQUE(user_id, date)
        );

        CREATE INDEX IF NOT EXISTS idx_mood_entries_user_date ON mood_entries(user_id, date DESC);
        "#,
    )
    .map_err(DatabaseError::Sqlite)?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS journal_entries (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            date TEXT NOT NULL,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            mood INTEGER NOT NULL CHECK(mood BETWEEN 1 AND 5),
            ai_prompt TEXT,
            sentiment TEXT CHECK(sentiment IS NULL OR sentiment IN ('positive', 'neutral', 'negative')),
            tags TEXT NOT NULL DEFAULT '[]',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (user_id) REFERENCES profiles(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_journal_entries_user_date ON journal_entries(user_id, date DESC);
        "#,
    )
    .map_err(DatabaseError::Sqlite)?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER NOT NULL,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );
        "#,
    )
    .map_err(DatabaseError::Sqlite)?;

    let recorded: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM schema_version WHERE version = ?1",
            [SCHEMA_VERSION],
            |row| row.get(0),
        )
        .map_err(DatabaseError::Sqlite)?;
    if recorded == 0 {
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [SCHEMA_VERSION],
        )
        .map_err(DatabaseError::Sqlite)?;
    }

    Ok(())
}
