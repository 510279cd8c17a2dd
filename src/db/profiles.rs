//! Profile rows: nickname and app preferences per user.

use super::{conversion_error, parse_uuid, timestamp_now};
use crate::errors::{AppError, AppResult, DatabaseError};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Per-user app preferences, stored as JSON.
///
/// New profiles start with reminders on and everything else off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub dark_mode: bool,
    pub reminders: bool,
    pub crisis_mode: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            dark_mode: false,
            reminders: true,
            crisis_mode: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: Uuid,
    pub nickname: Option<String>,
    pub preferences: Preferences,
    pub created_at: String,
    pub updated_at: String,
}

/// Partial profile update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub nickname: Option<Option<String>>,
    pub preferences: Option<Preferences>,
}

fn profile_from_row(row: &Row<'_>) -> Result<Profile, rusqlite::Error> {
    let preferences_json: String = row.get(2)?;
    Ok(Profile {
        id: parse_uuid(0, &row.get::<_, String>(0)?)?,
        nickname: row.get(1)?,
        preferences: serde_json::from_str(&preferences_json)
            .map_err(|e| conversion_error(2, e))?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

/// Creates the profile for `user_id` if it does not exist yet and returns it.
///
/// An existing profile keeps its nickname unless `nickname` is given.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn ensure_profile(
    conn: &Connection,
    user_id: Uuid,
    nickname: Option<&str>,
) -> AppResult<Profile> {
    debug!("Ensuring profile for user {}", user_id);

    let now = timestamp_now();
    let preferences = serde_json::to_string(&Preferences::default())?;
    conn.execute(
        r#"
        INSERT INTO profiles (id, nickname, preferences, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?4)
        ON CONFLICT(id) DO UPDATE SET
            nickname = COALESCE(excluded.nickname, profiles.nickname),
            updated_at = CASE WHEN excluded.nickname IS NULL
                THEN profiles.updated_at ELSE excluded.updated_at END
        "#,
        params![user_id.to_string(), nickname, preferences, now],
    )
    .map_err(DatabaseError::Sqlite)?;

    get_profile(conn, user_id)?
        .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", user_id)))
}

/// Retrieves the profile for `user_id`.
///
/// # Errors
///
/// Returns an error if the database operation fails.
/// Returns `Ok(None)` if no profile exists.
pub fn get_profile(conn: &Connection, user_id: Uuid) -> AppResult<Option<Profile>> {
    let profile = conn
        .query_row(
            r#"
            SELECT id, nickname, preferences, created_at, updated_at
            FROM profiles
            WHERE id = ?1
            "#,
            params![user_id.to_string()],
            profile_from_row,
        )
        .optional()
        .map_err(DatabaseError::Sqlite)?;
    Ok(profile)
}

/// Applies `update` to the profile of `user_id`.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the profile does not exist.
pub fn update_profile(
    conn: &Connection,
    user_id: Uuid,
    update: &ProfileUpdate,
) -> AppResult<Profile> {
    let mut profile = get_profile(conn, user_id)?
        .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", user_id)))?;

    if let Some(nickname) = &update.nickname {
        profile.nickname = nickname.clone();
    }
    if let Some(preferences) = update.preferences {
        profile.preferences = preferences;
    }
    profile.updated_at = timestamp_now();

    conn.execute(
        "UPDATE profiles SET nickname = ?1, preferences = ?2, updated_at = ?3 WHERE id = ?4",
        params![
            profile.nickname,
            serde_json::to_string(&profile.preferences)?,
            profile.updated_at,
            user_id.to_string()
        ],
    )
    .map_err(DatabaseError::Sqlite)?;

    debug!("Updated profile for user {}", user_id);
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn
    }

    #[test]
    fn test_ensure_profile_creates_with_defaults() {
        let conn = setup();
        let user = Uuid::new_v4();

        let profile = ensure_profile(&conn, user, Some("river")).unwrap();
        assert_eq!(profile.id, user);
        assert_eq!(profile.nickname.as_deref(), Some("river"));
        assert_eq!(profile.preferences, Preferences::default());
    }

    #[test]
    fn test_new_profile_has_reminders_on() {
        let conn = setup();
        let user = Uuid::new_v4();

        let profile = ensure_profile(&conn, user, None).unwrap();
        assert!(!profile.preferences.dark_mode);
        assert!(profile.preferences.reminders);
        assert!(!profile.preferences.crisis_mode);

        let stored: String = conn
            .query_row(
                "SELECT preferences FROM profiles WHERE id = ?1",
                params![user.to_string()],
                |row| row.get(0),
            )
            .unwrap();
        let stored: serde_json::Value = serde_json::from_str(&stored).unwrap();
        assert_eq!(
            stored,
            serde_json::json!({"dark_mode": false, "reminders": true, "crisis_mode": false})
        );
    }

    #[test]
    fn test_ensure_profile_is_idempotent_and_keeps_nickname() {
        let conn = setup();
        let user = Uuid::new_v4();

        let first = ensure_profile(&conn, user, Some("river")).unwrap();
        let second = ensure_profile(&conn, user, None).unwrap();
        assert_eq!(second.nickname.as_deref(), Some("river"));
        assert_eq!(first.created_at, second.created_at);

        let renamed = ensure_profile(&conn, user, Some("sky")).unwrap();
        assert_eq!(renamed.nickname.as_deref(), Some("sky"));
    }

    #[test]
    fn test_get_missing_profile() {
        let conn = setup();
        assert!(get_profile(&conn, Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_update_profile_preferences() {
        let conn = setup();
        let user = Uuid::new_v4();
        ensure_profile(&conn, user, None).unwrap();

        let update = ProfileUpdate {
            preferences: Some(Preferences {
                dark_mode: true,
                reminders: false,
                crisis_mode: true,
            }),
            ..ProfileUpdate::default()
        };
        let updated = update_profile(&conn, user, &update).unwrap();
        assert!(updated.preferences.dark_mode);
        assert!(updated.preferences.crisis_mode);

        let stored = get_profile(&conn, user).unwrap().unwrap();
        assert_eq!(stored.preferences, updated.preferences);
        assert!(stored.nickname.is_none());
    }

    #[test]
    fn test_update_missing_profile_is_not_found() {
        let conn = setup();
        let result = update_profile(&conn, Uuid::new_v4(), &ProfileUpdate::default());
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_partial_preferences_json_uses_defaults() {
        let prefs: Preferences = serde_json::from_str(r#"{"dark_mode": true}"#).unwrap();
        assert!(prefs.dark_mode);
        assert!(prefs.reminders);
        assert!(!prefs.crisis_mode);
    }
}
