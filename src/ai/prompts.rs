//! Instruction builders and the local fallback table.
//!
//! The instructions are plain strings sent as the single user turn of a
//! generateContent request. The fallback prompts are what the user sees when
//! the generative API is unavailable, so they must stand on their own.

use crate::constants::PROMPT_CONTEXT_WINDOW;
use crate::models::MoodLevel;
use rand::seq::SliceRandom;

/// Reflection prompts served when no generated prompt is available.
pub const FALLBACK_PROMPTS: [&str; 10] = [
    "What's one thing that happened today that you'd like to explore more deeply?",
    "How did you take care of yourself today, and what made you feel good?",
    "What emotions came up for you today, and what might have triggered them?",
    "If you could tell your past self from this morning one thing, what would it be?",
    "What's something you're grateful for today, even if it was a small moment?",
    "What challenged you today, and how did you handle it?",
    "What would you like to let go of from today before tomorrow begins?",
    "How did you connect with others today, or how would you like to connect tomorrow?",
    "What did you learn about yourself today?",
    "What's one thing you're looking forward to, no matter how small?",
];

/// Context line used when the caller has no earlier entries.
pub const FIRST_ENTRY_CONTEXT: &str = "This is their first entry.";

/// Picks one fallback prompt uniformly at random.
pub fn random_fallback_prompt() -> &'static str {
    FALLBACK_PROMPTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(FALLBACK_PROMPTS[0])
}

/// Joins the last two recent journal texts with ". ".
///
/// ```
/// use moodwell::ai::prompts::recent_context;
///
/// let texts: Vec<String> = ["a", "b", "c", "d", "e"].iter().map(|s| s.to_string()).collect();
/// assert_eq!(recent_context(&texts), "d. e");
/// assert_eq!(recent_context(&[]), "This is their first entry.");
/// ```
pub fn recent_context(recent: &[String]) -> String {
    let start = recent.len().saturating_sub(PROMPT_CONTEXT_WINDOW);
    let window = &recent[start..];
    let joined = window.join(". ");
    if joined.is_empty() {
        FIRST_ENTRY_CONTEXT.to_string()
    } else {
        joined
    }
}

/// Builds the instruction asking for one short journal prompt.
pub fn journal_prompt_instruction(mood: MoodLevel, recent: &[String]) -> String {
    format!(
        r#"As a supportive mental health assistant for teenagers, generate a thoughtful, gentle journal prompt for someone feeling {} today.

Guidelines:
- Keep it warm, understanding, and non-judgmental
- Make it specific enough to inspire reflection but open enough for personal interpretation
- Use language that feels natural for teenagers
- Focus on growth, self-compassion, and emotional awareness
- Avoid clinical language or overly formal tone
- Keep it to 1-2 sentences maximum

Previous context: {}

Generate only the journal prompt, nothing else."#,
        mood.description(),
        recent_context(recent)
    )
}

/// Builds the instruction asking for a one-word sentiment label.
pub fn sentiment_instruction(text: &str) -> String {
    format!(
        r#"Analyze the emotional sentiment of this journal entry from a teenager. Respond with only one word: "positive", "neutral", or "negative".

Text: "{}""#,
        text
    )
}
