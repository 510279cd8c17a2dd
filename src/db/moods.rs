//! Mood check-in rows.
//!
//! A user has at most one check-in per calendar day; saving again on the
//! same day replaces that day's check-in.

use super::{conversion_error, parse_date, parse_uuid, timestamp_now};
use crate::errors::{AppResult, DatabaseError};
use crate::models::MoodLevel;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;
use uuid::Uuid;

/// A stored mood check-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub mood: MoodLevel,
    pub mood_emoji: String,
    pub note: Option<String>,
    pub ai_prompt: Option<String>,
    pub ai_response: Option<String>,
    pub created_at: String,
}

/// Fields supplied by the caller when saving a check-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMoodEntry {
    pub date: NaiveDate,
    pub mood: MoodLevel,
    pub mood_emoji: String,
    pub note: Option<String>,
    pub ai_prompt: Option<String>,
    pub ai_response: Option<String>,
}

const SELECT_COLUMNS: &str =
    "id, user_id, date, mood, mood_emoji, note, ai_prompt, ai_response, created_at";

fn mood_from_row(row: &Row<'_>) -> Result<MoodEntry, rusqlite::Error> {
    let mood: u8 = row.get(3)?;
    Ok(MoodEntry {
        id: parse_uuid(0, &row.get::<_, String>(0)?)?,
        user_id: parse_uuid(1, &row.get::<_, String>(1)?)?,
        date: parse_date(2, &row.get::<_, String>(2)?)?,
        mood: MoodLevel::new(mood).map_err(|e| conversion_error(3, e))?,
        mood_emoji: row.get(4)?,
        note: row.get(5)?,
        ai_prompt: row.get(6)?,
        ai_response: row.get(7)?,
        created_at: row.get(8)?,
    })
}

/// Inserts the check-in for `entry.date`, or replaces the existing one.
///
/// The row keeps its id and creation time when replaced.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn upsert_mood_entry(
    conn: &Connection,
    user_id: Uuid,
    entry: &NewMoodEntry,
) -> AppResult<MoodEntry> {
    debug!("Upserting mood entry for {} on {}", user_id, entry.date);

    conn.execute(
        r#"
        INSERT INTO mood_entries
            (id, user_id, date, mood, mood_emoji, note, ai_prompt, ai_response, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        ON CONFLICT(user_id, date) DO UPDATE SET
            mood = excluded.mood,
            mood_emoji = excluded.mood_emoji,
            note = excluded.note,
            ai_prompt = excluded.ai_prompt,
            ai_response = excluded.ai_response
        "#,
        params![
            Uuid::new_v4().to_string(),
            user_id.to_string(),
            entry.date.to_string(),
            entry.mood.value(),
            entry.mood_emoji,
            entry.note,
            entry.ai_prompt,
            entry.ai_response,
            timestamp_now(),
        ],
    )
    .map_err(DatabaseError::Sqlite)?;

    let stored = conn
        .query_row(
            &format!(
                "SELECT {} FROM mood_entries WHERE user_id = ?1 AND date = ?2",
                SELECT_COLUMNS
            ),
            params![user_id.to_string(), entry.date.to_string()],
            mood_from_row,
        )
        .map_err(DatabaseError::Sqlite)?;

    debug!("Mood entry saved with id {}", stored.id);
    Ok(stored)
}

/// Lists all check-ins of `user_id`, newest date first.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn list_mood_entries(conn: &Connection, user_id: Uuid) -> AppResult<Vec<MoodEntry>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {} FROM mood_entries WHERE user_id = ?1 ORDER BY date DESC",
            SELECT_COLUMNS
        ))
        .map_err(DatabaseError::Sqlite)?;

    let entries = stmt
        .query_map(params![user_id.to_string()], mood_from_row)
        .map_err(DatabaseError::Sqlite)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::Sqlite)?;

    debug!("Fetched {} mood entries", entries.len());
    Ok(entries)
}

/// Retrieves the check-in of `user_id` for `date`.
///
/// # Errors
///
/// Returns an error if the database operation fails.
/// Returns `Ok(None)` if there is no check-in that day.
pub fn mood_entry_for_date(
    conn: &Connection,
    user_id: Uuid,
    date: NaiveDate,
) -> AppResult<Option<MoodEntry>> {
    let entry = conn
        .query_row(
            &format!(
                "SELECT {} FROM mood_entries WHERE user_id = ?1 AND date = ?2",
                SELECT_COLUMNS
            ),
            params![user_id.to_string(), date.to_string()],
            mood_from_row,
        )
        .optional()
        .map_err(DatabaseError::Sqlite)?;
    Ok(entry)
}
