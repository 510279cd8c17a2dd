//! Configuration management for the moodwell application.
//!
//! This module handles loading and validating configuration settings from environment
//! variables, with sensible defaults. Configuration is resolved once at startup and
//! never changes afterwards.
//!
//! # Environment Variables
//!
//! - `MOODWELL_GEMINI_API_KEY` (or `GEMINI_API_KEY`): credential for the generative
//!   API. Its absence selects offline mode, which is fully supported.
//! - `MOODWELL_GEMINI_ENDPOINT`: override for the generateContent URL
//! - `MOODWELL_DIR`: data directory (defaults to ~/.moodwell)
//! - `MOODWELL_LOG_FORMAT`: `text` (default) or `json`
//! - `HOME`: Used for expanding the default data directory path

use crate::constants::{
    DATABASE_FILE_NAME, DEFAULT_DATA_SUBDIR, DEFAULT_GEMINI_ENDPOINT, ENV_VAR_API_KEY,
    ENV_VAR_API_KEY_FALLBACK, ENV_VAR_ENDPOINT, ENV_VAR_HOME, ENV_VAR_LOG_FORMAT,
    ENV_VAR_MOODWELL_DIR, LOG_FORMAT_JSON, LOG_FORMAT_TEXT, REDACTED_PLACEHOLDER,
    SESSION_FILE_NAME,
};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::path::PathBuf;

/// The generative-language API credential.
///
/// `Debug` never prints the key itself.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a credential, treating blank strings as no credential at all.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(ApiKey(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED_PLACEHOLDER)
    }
}

/// How the text-generation service reaches the generative API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiSettings {
    /// No credential configured: every call takes the local fallback path.
    Offline,
    /// Credential configured: calls go to `endpoint`.
    Online { api_key: ApiKey, endpoint: String },
}

impl AiSettings {
    pub fn is_online(&self) -> bool {
        matches!(self, AiSettings::Online { .. })
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    fn parse(raw: &str) -> AppResult<Self> {
        match raw.trim().to_lowercase().as_str() {
            LOG_FORMAT_TEXT => Ok(LogFormat::Text),
            LOG_FORMAT_JSON => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!(
                "Invalid log format '{}'. Expected '{}' or '{}'",
                other, LOG_FORMAT_TEXT, LOG_FORMAT_JSON
            ))),
        }
    }
}

/// Configuration for the moodwell application.
///
/// # Examples
///
/// Creating a configuration manually:
/// ```
/// use moodwell::config::{AiSettings, Config, LogFormat};
/// use std::path::PathBuf;
///
/// let config = Config {
///     data_dir: PathBuf::from("/tmp/moodwell"),
///     ai: AiSettings::Offline,
///     log_format: LogFormat::Text,
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone)]
pub struct Config {
    /// Directory holding the database and the session file.
    pub data_dir: PathBuf,

    /// Online/offline mode for the text-generation service.
    pub ai: AiSettings,

    /// Log output format.
    pub log_format: LogFormat,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ai_mode = if self.ai.is_online() {
            "online"
        } else {
            "offline"
        };
        f.debug_struct("Config")
            .field("data_dir", &"[REDACTED_PATH]")
            .field("ai", &ai_mode)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from(""),
            ai: AiSettings::Offline,
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - The data directory path expansion fails or yields an empty path
    /// - `MOODWELL_LOG_FORMAT` holds an unknown value
    pub fn load() -> AppResult<Self> {
        let api_key = env::var(ENV_VAR_API_KEY)
            .ok()
            .and_then(ApiKey::new)
            .or_else(|| env::var(ENV_VAR_API_KEY_FALLBACK).ok().and_then(ApiKey::new));

        let ai = match api_key {
            Some(api_key) => {
                let endpoint = env::var(ENV_VAR_ENDPOINT)
                    .ok()
                    .map(|e| e.trim().to_string())
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| DEFAULT_GEMINI_ENDPOINT.to_string());
                AiSettings::Online { api_key, endpoint }
            }
            None => AiSettings::Offline,
        };

        let data_dir_str = match env::var(ENV_VAR_MOODWELL_DIR) {
            Ok(dir) => dir,
            Err(_) => {
                let home = env::var(ENV_VAR_HOME).map_err(|_| {
                    AppError::Config(format!(
                        "Neither {} nor {} is set",
                        ENV_VAR_MOODWELL_DIR, ENV_VAR_HOME
                    ))
                })?;
                format!("{}/{}", home, DEFAULT_DATA_SUBDIR)
            }
        };

        // Handles ~ and environment variable references
        let expanded_path = shellexpand::full(&data_dir_str)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;

        let data_dir = PathBuf::from(expanded_path.into_owned());

        if data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        let log_format = match env::var(ENV_VAR_LOG_FORMAT) {
            Ok(raw) => LogFormat::parse(&raw)?,
            Err(_) => LogFormat::default(),
        };

        Ok(Config {
            data_dir,
            ai,
            log_format,
        })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the data directory is empty or relative, or
    /// if an online configuration has an empty endpoint.
    pub fn validate(&self) -> AppResult<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        if !self.data_dir.is_absolute() {
            return Err(AppError::Config(
                "Data directory must be an absolute path".to_string(),
            ));
        }

        if let AiSettings::Online { endpoint, .. } = &self.ai {
            if endpoint.is_empty() {
                return Err(AppError::Config(
                    "Generative API endpoint is empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE_NAME)
    }

    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join(SESSION_FILE_NAME)
    }
}
