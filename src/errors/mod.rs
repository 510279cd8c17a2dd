//! Error handling utilities for the moodwell application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.
//!
//! Failures of the text-generation service are represented by `AIError`, but they
//! never leave that service: the service folds every `AIError` into a fallback
//! value and a [`FallbackReason`](crate::ai::FallbackReason) for logging.

use std::time::Duration;
use thiserror::Error;

/// Represents specific error cases that can occur during database operations.
///
/// # Examples
///
/// ```
/// use moodwell::errors::DatabaseError;
///
/// let error = DatabaseError::Sqlite(rusqlite::Error::InvalidQuery);
/// assert!(format!("{}", error).contains("Database error"));
/// ```
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// SQLite database error.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error.
    #[error("Failed to get connection from pool: {0}\n\nThis may indicate database connection issues. Try closing other moodwell instances.")]
    Pool(#[from] r2d2::Error),
}

/// Represents specific error cases that can occur when calling the
/// generative-language API.
///
/// # Examples
///
/// ```
/// use moodwell::errors::AIError;
///
/// let error = AIError::Status { status: 503, body: "overloaded".to_string() };
/// assert!(format!("{}", error).contains("503"));
/// ```
#[derive(Debug, Error)]
pub enum AIError {
    /// The endpoint could not be reached (DNS, connection, TLS).
    #[error("Generative API unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    /// The endpoint answered with a non-success HTTP status.
    #[error("Generative API returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, if any was readable
        body: String,
    },

    /// The call did not complete within its time budget.
    #[error("Generative API call timed out after {0:?}")]
    Timeout(Duration),

    /// The response could not be decoded or carried no candidate text.
    #[error("Invalid response from generative API: {0}")]
    InvalidResponse(String),
}

/// Represents all possible errors that can occur in the moodwell application.
///
/// # Examples
///
/// ```
/// use moodwell::errors::AppError;
///
/// let error = AppError::Config("Data directory path is empty".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Data directory path is empty");
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// User input that fails validation (mood out of range, blank title, ...).
    #[error("Invalid input: {0}")]
    Validation(String),

    /// A storage operation was attempted without a signed-in identity.
    #[error("Not signed in. Run `moodwell signin` first.")]
    NotAuthenticated,

    /// The requested row does not exist for the current user.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Errors from the SQLite row store.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Errors from the generative-language API.
    #[error("AI error: {0}")]
    AI(#[from] AIError),

    /// JSON encoding or decoding failed (session file, preferences, tags).
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<rusqlite::Error> for AppError {
    fn from(err: rusqlite::Error) -> Self {
        AppError::Database(DatabaseError::Sqlite(err))
    }
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// # Examples
///
/// ```
/// use moodwell::errors::{AppResult, AppError};
///
/// fn might_fail() -> AppResult<String> {
///     if false {
///         return Err(AppError::Validation("Something went wrong".to_string()));
///     }
///     Ok("Operation succeeded".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::io;

    #[test]
    fn test_app_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let app_error: AppError = io_error.into();

        match app_error {
            AppError::Io(inner) => {
                assert_eq!(inner.kind(), io::ErrorKind::NotFound);
            }
            _ => panic!("Expected AppError::Io variant"),
        }
    }

    #[test]
    fn test_app_error_display() {
        let config_error = AppError::Config("Invalid configuration".to_string());
        assert_eq!(
            format!("{}", config_error),
            "Configuration error: Invalid configuration"
        );

        let validation_error = AppError::Validation("mood must be 1-5".to_string());
        assert_eq!(
            format!("{}", validation_error),
            "Invalid input: mood must be 1-5"
        );

        let message = format!("{}", AppError::NotAuthenticated);
        assert!(message.contains("signin"));
    }

    #[test]
    fn test_ai_error_display() {
        let error = AIError::Timeout(Duration::from_secs(8));
        assert!(format!("{}", error).contains("8s"));

        let error = AIError::InvalidResponse("no candidates".to_string());
        assert!(format!("{}", error).contains("no candidates"));

        let app_error: AppError = AIError::Status {
            status: 429,
            body: String::new(),
        }
        .into();
        assert!(format!("{}", app_error).starts_with("AI error:"));
        assert!(format!("{}", app_error).contains("429"));
    }

    #[test]
    fn test_sqlite_error_converts_through_database_error() {
        let app_error: AppError = rusqlite::Error::QueryReturnedNoRows.into();

        match &app_error {
            AppError::Database(DatabaseError::Sqlite(rusqlite::Error::QueryReturnedNoRows)) => {}
            other => panic!("Expected AppError::Database(Sqlite), got {:?}", other),
        }

        let source = app_error
            .source()
            .expect("AppError::Database should have a source");
        assert!(source.downcast_ref::<DatabaseError>().is_some());
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_error = serde_json::from_str::<u32>("not json").unwrap_err();
        let app_error: AppError = json_error.into();
        assert!(matches!(app_error, AppError::Serialization(_)));
        assert!(format!("{}", app_error).contains("Serialization error"));
    }
}
