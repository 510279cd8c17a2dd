use crate::constants::{APP_DESCRIPTION, APP_NAME, MAX_BREATHING_CYCLES};
use clap::builder::BoolishValueParser;
use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = APP_NAME, about = APP_DESCRIPTION, author, version, long_about = None)]
pub struct CliArgs {
    /// Print verbose (debug) logs to stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in, creating a local identity on first use
    Signin {
        /// Name to greet you by
        #[arg(long)]
        nickname: Option<String>,
    },

    /// Sign out of the current identity
    Signout,

    /// Show the signed-in identity
    Whoami,

    /// Show or change your preferences
    Settings(SettingsArgs),

    /// Record how you feel today (1 = very low, 5 = amazing)
    Mood {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
        level: u8,

        /// Optional note about your day
        #[arg(long)]
        note: Option<String>,
    },

    /// List your mood check-ins, newest first
    Moods,

    /// Suggest a journal prompt
    Prompt {
        /// Mood to tailor the prompt to; skips your stored history
        #[arg(long, allow_negative_numbers = true)]
        mood: Option<i64>,
    },

    /// Write, list, edit or delete journal entries
    #[command(subcommand)]
    Journal(JournalCommand),

    /// Classify the emotional tone of a text
    Sentiment {
        text: String,
    },

    /// Summarize your check-ins and journal entries
    Insights,

    /// Guided 4-4-6 breathing
    Breathe {
        /// Number of full breathing cycles
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_BREATHING_CYCLES)))]
        cycles: u32,
    },

    /// Show a positive affirmation
    Affirmation {
        /// Which affirmation to show (wraps around)
        #[arg(long)]
        index: Option<usize>,
    },

    /// List the sleep stories
    SleepStories,

    /// Crisis lines and mental health resources
    Resources,
}

#[derive(Subcommand, Debug)]
pub enum JournalCommand {
    /// Write a new entry
    Write(WriteArgs),

    /// List your entries, newest first
    List,

    /// Change an existing entry
    Edit(EditArgs),

    /// Delete an entry
    Delete {
        id: Uuid,
    },
}

/// Each flag takes on/off (or true/false, yes/no).
#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    #[arg(long, value_name = "ON|OFF", value_parser = BoolishValueParser::new())]
    pub dark_mode: Option<bool>,

    /// Daily check-in reminders
    #[arg(long, value_name = "ON|OFF", value_parser = BoolishValueParser::new())]
    pub reminders: Option<bool>,

    /// Show crisis resources more prominently
    #[arg(long, value_name = "ON|OFF", value_parser = BoolishValueParser::new())]
    pub crisis_mode: Option<bool>,
}

impl SettingsArgs {
    pub fn is_empty(&self) -> bool {
        self.dark_mode.is_none() && self.reminders.is_none() && self.crisis_mode.is_none()
    }
}

#[derive(Args, Debug)]
pub struct WriteArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub content: String,

    /// Tag the entry; repeat for several tags
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// The prompt this entry answers
    #[arg(long)]
    pub prompt: Option<String>,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    pub id: Uuid,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub content: Option<String>,

    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub mood: Option<u8>,

    /// Replace the entry's tags; repeat for several tags
    #[arg(long = "tag", conflicts_with = "clear_tags")]
    pub tags: Vec<String>,

    /// Remove all tags
    #[arg(long)]
    pub clear_tags: bool,
}

impl EditArgs {
    /// The requested tag change, if any.
    pub fn tag_change(&self) -> Option<Vec<String>> {
        if self.clear_tags {
            Some(Vec::new())
        } else if self.tags.is_empty() {
            None
        } else {
            Some(self.tags.clone())
        }
    }
}
