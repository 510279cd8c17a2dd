//! Journal workflows: prompt suggestion, writing, editing and listing entries.

use crate::ai::{GenerativeTransport, TextGenerationService};
use crate::constants::RECENT_JOURNAL_CONTEXT;
use crate::db::journal::{
    delete_journal_entry, insert_journal_entry, list_journal_entries, update_journal_entry,
    JournalEntry, JournalUpdate, NewJournalEntry,
};
use crate::db::moods::mood_entry_for_date;
use crate::db::profiles::ensure_profile;
use crate::errors::{AppError, AppResult};
use crate::models::MoodLevel;
use crate::session::Session;
use chrono::NaiveDate;
use rusqlite::Connection;
use tracing::{debug, info};
use uuid::Uuid;

/// A new entry as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct JournalDraft {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    /// The prompt the user was answering, if any.
    pub prompt: Option<String>,
}

/// Changes to an existing entry; `None` fields are left as they are.
#[derive(Debug, Clone, Default)]
pub struct JournalEdit {
    pub title: Option<String>,
    pub content: Option<String>,
    pub mood: Option<MoodLevel>,
    pub tags: Option<Vec<String>>,
}

fn todays_mood(conn: &Connection, session: &Session, today: NaiveDate) -> AppResult<MoodLevel> {
    Ok(mood_entry_for_date(conn, session.user_id, today)?
        .map(|entry| entry.mood)
        .unwrap_or_default())
}

fn required(field: &str, value: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} cannot be empty", field)));
    }
    Ok(trimmed.to_string())
}

/// Trims tags and drops blanks and repeats, keeping first-seen order.
fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
        if !out.iter().any(|seen| seen == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

/// Suggests a journal prompt from today's mood and the most recent entries.
///
/// Without a check-in today the mood defaults to 3. Always yields a prompt.
///
/// # Errors
///
/// Returns an error only if reading the user's rows fails.
pub async fn suggest_prompt<T: GenerativeTransport>(
    conn: &Connection,
    service: &TextGenerationService<T>,
    session: &Session,
    today: NaiveDate,
) -> AppResult<String> {
    let mood = todays_mood(conn, session, today)?;

    // Newest first from the store; the service wants oldest first.
    let mut recent: Vec<String> = list_journal_entries(conn, session.user_id)?
        .into_iter()
        .take(RECENT_JOURNAL_CONTEXT)
        .map(|entry| entry.content)
        .collect();
    recent.reverse();

    debug!(
        "Suggesting prompt for mood {} with {} recent entries",
        mood,
        recent.len()
    );
    Ok(service
        .generate_prompt(i64::from(mood.value()), &recent)
        .await)
}

/// Saves a new entry with today's mood and a sentiment label.
///
/// # Errors
///
/// Returns `AppError::Validation` if the title or content is blank, or an
/// error if the database operation fails.
pub async fn write_entry<T: GenerativeTransport>(
    conn: &Connection,
    service: &TextGenerationService<T>,
    session: &Session,
    draft: &JournalDraft,
    today: NaiveDate,
) -> AppResult<JournalEntry> {
    let title = required("Title", &draft.title)?;
    let content = required("Content", &draft.content)?;

    ensure_profile(conn, session.user_id, None)?;
    let mood = todays_mood(conn, session, today)?;
    let sentiment = service.classify_sentiment(&content).await;

    let entry = insert_journal_entry(
        conn,
        session.user_id,
        &NewJournalEntry {
            date: today,
            title,
            content,
            mood,
            ai_prompt: draft
                .prompt
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
            sentiment: Some(sentiment),
            tags: normalize_tags(&draft.tags),
        },
    )?;

    info!("Wrote journal entry {} ({})", entry.id, sentiment);
    Ok(entry)
}

/// Applies `edit` to entry `id`. Changed content is classified again.
///
/// # Errors
///
/// Returns `AppError::Validation` for blank title or content, and
/// `AppError::NotFound` if the entry is not the user's.
pub async fn edit_entry<T: GenerativeTransport>(
    conn: &Connection,
    service: &TextGenerationService<T>,
    session: &Session,
    id: Uuid,
    edit: &JournalEdit,
) -> AppResult<JournalEntry> {
    let title = edit.title.as_deref().map(|t| required("Title", t)).transpose()?;
    let content = edit
        .content
        .as_deref()
        .map(|c| required("Content", c))
        .transpose()?;

    let sentiment = match &content {
        Some(content) => Some(Some(service.classify_sentiment(content).await)),
        None => None,
    };

    let update = JournalUpdate {
        title,
        content,
        mood: edit.mood,
        ai_prompt: None,
        sentiment,
        tags: edit.tags.as_deref().map(normalize_tags),
    };
    if update.is_empty() {
        return Err(AppError::Validation("Nothing to change".to_string()));
    }

    update_journal_entry(conn, session.user_id, id, &update)
}

/// Deletes entry `id`.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the entry is not the user's.
pub fn delete_entry(conn: &Connection, session: &Session, id: Uuid) -> AppResult<()> {
    delete_journal_entry(conn, session.user_id, id)
}

/// All entries of the signed-in user, newest first.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn list_entries(conn: &Connection, session: &Session) -> AppResult<Vec<JournalEntry>> {
    list_journal_entries(conn, session.user_id)
}
