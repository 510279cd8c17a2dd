//! High-level operations the CLI runs on behalf of the signed-in user.
//!
//! These orchestrate the row store and the text-generation service: mood
//! check-ins, journal prompts and entries, and the insights summary.

pub mod checkin;
pub mod insights;
pub mod journal;

// Re-export commonly used functions
pub use checkin::{list_moods, record_mood};
pub use insights::{compute as compute_insights, Insights, TrendPoint};
pub use journal::{
    delete_entry, edit_entry, list_entries, suggest_prompt, write_entry, JournalDraft,
    JournalEdit,
};
