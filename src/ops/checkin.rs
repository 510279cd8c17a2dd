//! Daily mood check-in.

use crate::db::moods::{list_mood_entries, upsert_mood_entry, MoodEntry, NewMoodEntry};
use crate::db::profiles::ensure_profile;
use crate::errors::AppResult;
use crate::models::MoodLevel;
use crate::session::Session;
use chrono::NaiveDate;
use rusqlite::Connection;
use tracing::info;

/// Records today's mood, replacing an earlier check-in from the same day.
///
/// A blank note is stored as no note.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn record_mood(
    conn: &Connection,
    session: &Session,
    mood: MoodLevel,
    note: Option<&str>,
    today: NaiveDate,
) -> AppResult<MoodEntry> {
    ensure_profile(conn, session.user_id, None)?;

    let note = note
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);

    let entry = upsert_mood_entry(
        conn,
        session.user_id,
        &NewMoodEntry {
            date: today,
            mood,
            mood_emoji: mood.emoji().to_string(),
            note,
            ai_prompt: None,
            ai_response: None,
        },
    )?;

    info!("Recorded mood {} for {}", mood, today);
    Ok(entry)
}

/// All check-ins of the signed-in user, newest first.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn list_moods(conn: &Connection, session: &Session) -> AppResult<Vec<MoodEntry>> {
    list_mood_entries(conn, session.user_id)
}
