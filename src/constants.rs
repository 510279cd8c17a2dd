//! Constants used throughout the application.
//!
//! This module contains all constants used in the Moodwell application, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

use std::time::Duration;

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "moodwell";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "Mood check-ins, journaling, and mindfulness for everyday mental health";

// Configuration Keys & Environment Variables
/// Environment variable holding the generative-language API key.
pub const ENV_VAR_API_KEY: &str = "MOODWELL_GEMINI_API_KEY";
/// Conventional fallback environment variable for the API key.
pub const ENV_VAR_API_KEY_FALLBACK: &str = "GEMINI_API_KEY";
/// Environment variable overriding the generateContent endpoint.
pub const ENV_VAR_ENDPOINT: &str = "MOODWELL_GEMINI_ENDPOINT";
/// Environment variable for the data directory.
pub const ENV_VAR_MOODWELL_DIR: &str = "MOODWELL_DIR";
/// Environment variable selecting the log output format.
pub const ENV_VAR_LOG_FORMAT: &str = "MOODWELL_LOG_FORMAT";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default sub-directory name for application data within the user's home directory.
pub const DEFAULT_DATA_SUBDIR: &str = ".moodwell";
/// Database file name inside the data directory.
pub const DATABASE_FILE_NAME: &str = "moodwell.db";
/// Session file name inside the data directory.
pub const SESSION_FILE_NAME: &str = "session.json";
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// Logging
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "moodwell";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";

// Generative-language API
/// Default generateContent endpoint.
pub const DEFAULT_GEMINI_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent";
/// Time budget for journal prompt generation.
pub const PROMPT_TIMEOUT: Duration = Duration::from_secs(10);
/// Sampling temperature for journal prompt generation.
pub const PROMPT_TEMPERATURE: f32 = 0.7;
/// Output cap for journal prompt generation.
pub const PROMPT_MAX_OUTPUT_TOKENS: u32 = 100;
/// Time budget for sentiment classification.
pub const SENTIMENT_TIMEOUT: Duration = Duration::from_secs(8);
/// Sampling temperature for sentiment classification.
pub const SENTIMENT_TEMPERATURE: f32 = 0.1;
/// Output cap for sentiment classification.
pub const SENTIMENT_MAX_OUTPUT_TOKENS: u32 = 10;
/// Number of recent journal texts embedded as prompt context.
pub const PROMPT_CONTEXT_WINDOW: usize = 2;

// Journaling
/// Mood assumed when no check-in exists for the day.
pub const DEFAULT_MOOD_LEVEL: u8 = 3;
/// Number of recent journal bodies handed to prompt generation.
pub const RECENT_JOURNAL_CONTEXT: usize = 3;

// Insights
/// Number of most recent check-ins shown in the mood trend.
pub const TREND_WINDOW: usize = 14;
/// Days counted as "this week".
pub const WEEK_DAYS: i64 = 7;

// Mindfulness
/// Seconds spent breathing in.
pub const BREATH_INHALE_SECS: u32 = 4;
/// Seconds spent holding the breath.
pub const BREATH_HOLD_SECS: u32 = 4;
/// Seconds spent breathing out.
pub const BREATH_EXHALE_SECS: u32 = 6;
/// Upper bound for `breathe --cycles`.
pub const MAX_BREATHING_CYCLES: u32 = 100;

// Date/Time Logic
/// Date format string for ISO date format (YYYY-MM-DD).
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
/// Date format used for trend labels (e.g. "Jan 05").
pub const DATE_FORMAT_SHORT: &str = "%b %d";
