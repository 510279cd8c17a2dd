//! Value types shared by the text-generation service, the row store and the CLI.

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A self-reported mood on an ordinal 1 (very low) to 5 (amazing) scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MoodLevel(u8);

impl MoodLevel {
    /// Lowest valid mood.
    pub const MIN: MoodLevel = MoodLevel(1);
    /// Highest valid mood.
    pub const MAX: MoodLevel = MoodLevel(5);

    /// All five levels, lowest first.
    pub const ALL: [MoodLevel; 5] = [
        MoodLevel(1),
        MoodLevel(2),
        MoodLevel(3),
        MoodLevel(4),
        MoodLevel(5),
    ];

    /// Creates a mood level, rejecting values outside 1..=5.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for out-of-range values.
    pub fn new(value: u8) -> AppResult<Self> {
        if (1..=5).contains(&value) {
            Ok(MoodLevel(value))
        } else {
            Err(AppError::Validation(format!(
                "Mood must be between 1 and 5, got {}",
                value
            )))
        }
    }

    /// Creates a mood level, clamping out-of-range values to the nearest bound.
    ///
    /// ```
    /// use moodwell::MoodLevel;
    ///
    /// assert_eq!(MoodLevel::clamped(0).value(), 1);
    /// assert_eq!(MoodLevel::clamped(4).value(), 4);
    /// assert_eq!(MoodLevel::clamped(42).value(), 5);
    /// ```
    pub fn clamped(value: i64) -> Self {
        MoodLevel(value.clamp(1, 5) as u8)
    }

    /// The numeric value (1..=5).
    pub fn value(self) -> u8 {
        self.0
    }

    pub fn emoji(self) -> &'static str {
        match self.0 {
            1 => "😢",
            2 => "😔",
            3 => "😐",
            4 => "😊",
            _ => "😄",
        }
    }

    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "Very Low",
            2 => "Low",
            3 => "Okay",
            4 => "Good",
            _ => "Amazing",
        }
    }

    /// Phrase describing the mood inside a generation instruction.
    pub fn description(self) -> &'static str {
        match self.0 {
            1 => "very low/difficult",
            2 => "low/challenging",
            3 => "neutral/okay",
            4 => "good/positive",
            _ => "excellent/amazing",
        }
    }
}

impl Default for MoodLevel {
    fn default() -> Self {
        MoodLevel(crate::constants::DEFAULT_MOOD_LEVEL)
    }
}

impl TryFrom<u8> for MoodLevel {
    type Error = AppError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        MoodLevel::new(value)
    }
}

impl From<MoodLevel> for u8 {
    fn from(level: MoodLevel) -> Self {
        level.0
    }
}

impl fmt::Display for MoodLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Emotional tone of a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

/// Parses exactly `positive`, `neutral` or `negative`; nothing else.
impl FromStr for Sentiment {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(Sentiment::Positive),
            "neutral" => Ok(Sentiment::Neutral),
            "negative" => Ok(Sentiment::Negative),
            other => Err(AppError::Validation(format!(
                "Unknown sentiment label: {:?}",
                other
            ))),
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
