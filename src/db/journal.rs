//! Journal entry rows.
//!
//! Every statement is filtered by the owning user, so an entry that belongs to
//! someone else is indistinguishable from one that does not exist.

use super::{conversion_error, parse_date, parse_uuid, timestamp_now};
use crate::errors::{AppError, AppResult, DatabaseError};
use crate::models::{MoodLevel, Sentiment};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info};
use uuid::Uuid;

/// A stored journal entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub title: String,
    pub content: String,
    pub mood: MoodLevel,
    pub ai_prompt: Option<String>,
    pub sentiment: Option<Sentiment>,
    pub tags: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields supplied by the caller when creating an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJournalEntry {
    pub date: NaiveDate,
    pub title: String,
    pub content: String,
    pub mood: MoodLevel,
    pub ai_prompt: Option<String>,
    pub sentiment: Option<Sentiment>,
    pub tags: Vec<String>,
}

/// Partial update of a journal entry; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub mood: Option<MoodLevel>,
    pub ai_prompt: Option<Option<String>>,
    pub sentiment: Option<Option<Sentiment>>,
    pub tags: Option<Vec<String>>,
}

impl JournalUpdate {
    pub fn is_empty(&self) -> bool {
        *self == JournalUpdate::default()
    }
}

const SELECT_COLUMNS: &str = "id, user_id, date, title, content, mood, ai_prompt, sentiment, \
     tags, created_at, updated_at";

fn journal_from_row(row: &Row<'_>) -> Result<JournalEntry, rusqlite::Error> {
    let mood: u8 = row.get(5)?;
    let sentiment: Option<String> = row.get(7)?;
    let tags: String = row.get(8)?;

    Ok(JournalEntry {
        id: parse_uuid(0, &row.get::<_, String>(0)?)?,
        user_id: parse_uuid(1, &row.get::<_, String>(1)?)?,
        date: parse_date(2, &row.get::<_, String>(2)?)?,
        title: row.get(3)?,
        content: row.get(4)?,
        mood: MoodLevel::new(mood).map_err(|e| conversion_error(5, e))?,
        ai_prompt: row.get(6)?,
        sentiment: sentiment
            .map(|s| s.parse::<Sentiment>())
            .transpose()
            .map_err(|e| conversion_error(7, e))?,
        tags: serde_json::from_str(&tags).map_err(|e| conversion_error(8, e))?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Journal entry {} not found", id))
}

/// Inserts a new journal entry for `user_id`.
///
/// # Errors
///
/// Returns an error if the database operation fails, including when no
/// profile exists for `user_id`.
pub fn insert_journal_entry(
    conn: &Connection,
    user_id: Uuid,
    entry: &NewJournalEntry,
) -> AppResult<JournalEntry> {
    let id = Uuid::new_v4();
    let now = timestamp_now();
    debug!("Inserting journal entry {} for {}", id, entry.date);

    conn.execute(
        r#"
        INSERT INTO journal_entries
            (id, user_id, date, title, content, mood, ai_prompt, sentiment, tags, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)
        "#,
        params![
            id.to_string(),
            user_id.to_string(),
            entry.date.to_string(),
            entry.title,
            entry.content,
            entry.mood.value(),
            entry.ai_prompt,
            entry.sentiment.map(Sentiment::as_str),
            serde_json::to_string(&entry.tags)?,
            now,
        ],
    )
    .map_err(DatabaseError::Sqlite)?;

    info!("Saved journal entry {}", id);
    Ok(JournalEntry {
        id,
        user_id,
        date: entry.date,
        title: entry.title.clone(),
        content: entry.content.clone(),
        mood: entry.mood,
        ai_prompt: entry.ai_prompt.clone(),
        sentiment: entry.sentiment,
        tags: entry.tags.clone(),
        created_at: now.clone(),
        updated_at: now,
    })
}

/// Retrieves one entry of `user_id` by id.
///
/// # Errors
///
/// Returns an error if the database operation fails.
/// Returns `Ok(None)` if no such entry belongs to `user_id`.
pub fn get_journal_entry(
    conn: &Connection,
    user_id: Uuid,
    id: Uuid,
) -> AppResult<Option<JournalEntry>> {
    let entry = conn
        .query_row(
            &format!(
                "SELECT {} FROM journal_entries WHERE id = ?1 AND user_id = ?2",
                SELECT_COLUMNS
            ),
            params![id.to_string(), user_id.to_string()],
            journal_from_row,
        )
        .optional()
        .map_err(DatabaseError::Sqlite)?;
    Ok(entry)
}

/// Applies `update` to entry `id` and bumps its `updated_at`.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the entry does not exist or belongs to
/// another user.
pub fn update_journal_entry(
    conn: &Connection,
    user_id: Uuid,
    id: Uuid,
    update: &JournalUpdate,
) -> AppResult<JournalEntry> {
    let mut entry = get_journal_entry(conn, user_id, id)?.ok_or_else(|| not_found(id))?;

    if let Some(title) = &update.title {
        entry.title = title.clone();
    }
    if let Some(content) = &update.content {
        entry.content = content.clone();
    }
    if let Some(mood) = update.mood {
        entry.mood = mood;
    }
    if let Some(ai_prompt) = &update.ai_prompt {
        entry.ai_prompt = ai_prompt.clone();
    }
    if let Some(sentiment) = update.sentiment {
        entry.sentiment = sentiment;
    }
    if let Some(tags) = &update.tags {
        entry.tags = tags.clone();
    }
    entry.updated_at = timestamp_now();

    conn.execute(
        r#"
        UPDATE journal_entries
        SET title = ?1, content = ?2, mood = ?3, ai_prompt = ?4, sentiment = ?5,
            tags = ?6, updated_at = ?7
        WHERE id = ?8 AND user_id = ?9
        "#,
        params![
            entry.title,
            entry.content,
            entry.mood.value(),
            entry.ai_prompt,
            entry.sentiment.map(Sentiment::as_str),
            serde_json::to_string(&entry.tags)?,
            entry.updated_at,
            id.to_string(),
            user_id.to_string(),
        ],
    )
    .map_err(DatabaseError::Sqlite)?;

    debug!("Updated journal entry {}", id);
    Ok(entry)
}

/// Deletes entry `id` of `user_id`.
///
/// # Errors
///
/// Returns `AppError::NotFound` if nothing was deleted.
pub fn delete_journal_entry(conn: &Connection, user_id: Uuid, id: Uuid) -> AppResult<()> {
    let deleted = conn
        .execute(
            "DELETE FROM journal_entries WHERE id = ?1 AND user_id = ?2",
            params![id.to_string(), user_id.to_string()],
        )
        .map_err(DatabaseError::Sqlite)?;

    if deleted == 0 {
        return Err(not_found(id));
    }
    info!("Deleted journal entry {}", id);
    Ok(())
}

/// Lists all entries of `user_id`, newest date first; entries on the same
/// date are ordered newest-created first.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn list_journal_entries(conn: &Connection, user_id: Uuid) -> AppResult<Vec<JournalEntry>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {} FROM journal_entries WHERE user_id = ?1 \
             ORDER BY date DESC, created_at DESC, rowid DESC",
            SELECT_COLUMNS
        ))
        .map_err(DatabaseError::Sqlite)?;

    let entries = stmt
        .query_map(params![user_id.to_string()], journal_from_row)
        .map_err(DatabaseError::Sqlite)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::Sqlite)?;

    debug!("Fetched {} journal entries", entries.len());
    Ok(entries)
}
