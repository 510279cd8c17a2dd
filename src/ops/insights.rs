//! Summary statistics over a user's check-ins and journal entries.

use crate::constants::{TREND_WINDOW, WEEK_DAYS};
use crate::db::journal::JournalEntry;
use crate::db::moods::MoodEntry;
use crate::models::{MoodLevel, Sentiment};
use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// One point of the mood trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub mood: MoodLevel,
}

/// Computed insights; empty buckets are omitted from both distributions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    /// Mean check-in mood, `None` without check-ins.
    pub average_mood: Option<f64>,
    /// Check-ins plus journal entries.
    pub total_entries: usize,
    /// Check-ins dated within the last seven days.
    pub check_ins_this_week: usize,
    /// The most recent check-ins, oldest first.
    pub trend: Vec<TrendPoint>,
    /// Amazing first, down to Very Low.
    pub mood_distribution: Vec<(MoodLevel, usize)>,
    pub sentiment_distribution: Vec<(Sentiment, usize)>,
    pub most_common_mood: Option<MoodLevel>,
}

impl Insights {
    pub fn is_empty(&self) -> bool {
        self.total_entries == 0
    }

    /// Average mood rounded to one decimal, e.g. `3.7`.
    pub fn average_display(&self) -> Option<String> {
        self.average_mood.map(|avg| format!("{:.1}", avg))
    }
}

/// Computes insights as of `today`.
///
/// ```
/// use moodwell::ops::insights::compute;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let insights = compute(&[], &[], today);
/// assert!(insights.is_empty());
/// assert_eq!(insights.average_mood, None);
/// ```
pub fn compute(moods: &[MoodEntry], journals: &[JournalEntry], today: NaiveDate) -> Insights {
    let average_mood = if moods.is_empty() {
        None
    } else {
        let sum: u32 = moods.iter().map(|m| u32::from(m.mood.value())).sum();
        Some(f64::from(sum) / moods.len() as f64)
    };

    let week_start = today - Duration::days(WEEK_DAYS);
    let check_ins_this_week = moods.iter().filter(|m| m.date >= week_start).count();

    let mut trend: Vec<TrendPoint> = moods
        .iter()
        .map(|m| TrendPoint {
            date: m.date,
            mood: m.mood,
        })
        .collect();
    trend.sort_by_key(|p| p.date);
    let skip = trend.len().saturating_sub(TREND_WINDOW);
    let trend = trend.split_off(skip);

    let mood_distribution: Vec<(MoodLevel, usize)> = MoodLevel::ALL
        .iter()
        .rev()
        .map(|level| (*level, moods.iter().filter(|m| m.mood == *level).count()))
        .filter(|(_, count)| *count > 0)
        .collect();

    let sentiment_distribution: Vec<(Sentiment, usize)> = Sentiment::ALL
        .iter()
        .map(|s| {
            (
                *s,
                journals.iter().filter(|j| j.sentiment == Some(*s)).count(),
            )
        })
        .filter(|(_, count)| *count > 0)
        .collect();

    // Ties go to the lower mood.
    let most_common_mood = mood_distribution
        .iter()
        .copied()
        .reduce(|best, current| if best.1 > current.1 { best } else { current })
        .map(|(level, _)| level);

    Insights {
        average_mood,
        total_entries: moods.len() + journals.len(),
        check_ins_this_week,
        trend,
        mood_distribution,
        sentiment_distribution,
        most_common_mood,
    }
}
