/*!
# moodwell

Command-line companion for everyday mental health: daily mood check-ins,
journaling with AI-suggested prompts and sentiment labels, insights over your
history, and short mindfulness exercises.

## Usage

```text
moodwell [-v] <COMMAND>

Commands:
  signin         Sign in, creating a local identity on first use
  signout        Sign out of the current identity
  whoami         Show the signed-in identity
  settings       Show or change your preferences
  mood           Record how you feel today (1 = very low, 5 = amazing)
  moods          List your mood check-ins, newest first
  prompt         Suggest a journal prompt
  journal        Write, list, edit or delete journal entries
  sentiment      Classify the emotional tone of a text
  insights       Summarize your check-ins and journal entries
  breathe        Guided 4-4-6 breathing
  affirmation    Show a positive affirmation
  sleep-stories  List the sleep stories
  resources      Crisis lines and mental health resources
```

## Configuration

- `MOODWELL_GEMINI_API_KEY` or `GEMINI_API_KEY`: enables AI prompts and
  sentiment; without it moodwell works fully offline
- `MOODWELL_GEMINI_ENDPOINT`: overrides the generateContent endpoint
- `MOODWELL_DIR`: data directory (defaults to `~/.moodwell`)
- `MOODWELL_LOG_FORMAT`: `text` (default) or `json`
- `RUST_LOG`: log filter directives
*/

use chrono::{Local, NaiveDate};
use clap::Parser;
use moodwell::ai::TextGenerationService;
use moodwell::cli::{CliArgs, Command, EditArgs, JournalCommand, SettingsArgs, WriteArgs};
use moodwell::config::{Config, LogFormat};
use moodwell::constants::{
    DATE_FORMAT_SHORT, DEFAULT_LOG_LEVEL, TRACING_ROOT_SPAN_NAME, TRACING_SERVICE_NAME,
};
use moodwell::db::schema::Table;
use moodwell::db::profiles::{self, Preferences, ProfileUpdate};
use moodwell::db::{count_rows, Database, PooledConnection};
use moodwell::errors::AppResult;
use moodwell::mindfulness::{Affirmations, BreathEvent, Breathing, SLEEP_STORIES};
use moodwell::models::MoodLevel;
use moodwell::ops::{self, JournalDraft, JournalEdit};
use moodwell::resources;
use moodwell::session::{Session, SessionStore};
use std::io;
use std::time::Duration;
use tracing::{debug, error, info, info_span, Instrument};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    let config = match Config::load().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(config.log_format, args.verbose);

    let span = info_span!(
        TRACING_ROOT_SPAN_NAME,
        service_name = TRACING_SERVICE_NAME,
        correlation_id = %Uuid::new_v4(),
    );

    if let Err(e) = run(args, config).instrument(span).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(format: LogFormat, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false);

    match format {
        LogFormat::Json => builder.json().with_current_span(true).init(),
        LogFormat::Text => builder.init(),
    }
}

async fn run(args: CliArgs, config: Config) -> AppResult<()> {
    debug!("CLI arguments: {:?}", args);
    debug!("Configuration: {:?}", config);

    let sessions = SessionStore::new(&config.session_path());
    let service = TextGenerationService::from_settings(&config.ai);
    let today = Local::now().date_naive();

    match args.command {
        Command::Signin { nickname } => {
            let session = sessions.sign_in(nickname.as_deref())?;
            let conn = open_store(&config)?;
            let profile = profiles::ensure_profile(&conn, session.user_id, session.nickname.as_deref())?;
            match &profile.nickname {
                Some(name) => println!("Welcome, {}!", name),
                None => println!("Signed in."),
            }
        }
        Command::Signout => {
            sessions.sign_out()?;
            println!("Signed out.");
        }
        Command::Whoami => {
            let session = sessions.current()?;
            let conn = open_store(&config)?;
            println!("User: {}", session.user_id);
            if let Some(name) = &session.nickname {
                println!("Nickname: {}", name);
            }
            println!(
                "Check-ins: {}",
                count_rows(&conn, Table::MoodEntries, session.user_id)?
            );
            println!(
                "Journal entries: {}",
                count_rows(&conn, Table::JournalEntries, session.user_id)?
            );
            println!(
                "AI: {}",
                if service.is_online() { "online" } else { "offline" }
            );
        }
        Command::Settings(settings) => {
            let session = sessions.current()?;
            let conn = open_store(&config)?;
            let preferences = apply_settings(&conn, &session, &settings)?;
            print_preferences(&preferences);
        }
        Command::Mood { level, note } => {
            let session = sessions.current()?;
            let conn = open_store(&config)?;
            let entry = ops::record_mood(&conn, &session, MoodLevel::new(level)?, note.as_deref(), today)?;
            println!(
                "{} Mood saved for {}: {}",
                entry.mood_emoji,
                entry.date,
                entry.mood.label()
            );
        }
        Command::Moods => {
            let session = sessions.current()?;
            let conn = open_store(&config)?;
            let entries = ops::list_moods(&conn, &session)?;
            if entries.is_empty() {
                println!("No check-ins yet. Try `moodwell mood 3`.");
            }
            for entry in entries {
                match &entry.note {
                    Some(note) => println!(
                        "{}  {} {:<8}  {}",
                        entry.date,
                        entry.mood_emoji,
                        entry.mood.label(),
                        note
                    ),
                    None => println!("{}  {} {}", entry.date, entry.mood_emoji, entry.mood.label()),
                }
            }
        }
        Command::Prompt { mood: Some(mood) } => {
            println!("{}", service.generate_prompt(mood, &[]).await);
        }
        Command::Prompt { mood: None } => {
            let session = sessions.current()?;
            let conn = open_store(&config)?;
            println!(
                "{}",
                ops::suggest_prompt(&conn, &service, &session, today).await?
            );
        }
        Command::Journal(command) => {
            let session = sessions.current()?;
            let conn = open_store(&config)?;
            run_journal(command, &conn, &service, &session, today).await?;
        }
        Command::Sentiment { text } => {
            println!("{}", service.classify_sentiment(&text).await);
        }
        Command::Insights => {
            let session = sessions.current()?;
            let conn = open_store(&config)?;
            let moods = ops::list_moods(&conn, &session)?;
            let journals = ops::list_entries(&conn, &session)?;
            print_insights(&ops::compute_insights(&moods, &journals, today));
        }
        Command::Breathe { cycles } => breathe(cycles).await,
        Command::Affirmation { index } => {
            let affirmations = match index {
                Some(index) => Affirmations::starting_at(index),
                None => Affirmations::starting_at(rand::random::<usize>()),
            };
            println!("{}", affirmations.current());
        }
        Command::SleepStories => {
            for story in SLEEP_STORIES {
                println!("{}\n  {}\n\n  {}\n", story.title, story.description, story.content);
            }
        }
        Command::Resources => print!("{}", resources::render()),
    }

    Ok(())
}

fn apply_settings(
    conn: &PooledConnection,
    session: &Session,
    settings: &SettingsArgs,
) -> AppResult<Preferences> {
    let profile = profiles::ensure_profile(conn, session.user_id, None)?;
    if settings.is_empty() {
        return Ok(profile.preferences);
    }

    let current = profile.preferences;
    let preferences = Preferences {
        dark_mode: settings.dark_mode.unwrap_or(current.dark_mode),
        reminders: settings.reminders.unwrap_or(current.reminders),
        crisis_mode: settings.crisis_mode.unwrap_or(current.crisis_mode),
    };
    let update = ProfileUpdate {
        preferences: Some(preferences),
        ..ProfileUpdate::default()
    };
    info!("Updating preferences");
    Ok(profiles::update_profile(conn, session.user_id, &update)?.preferences)
}

fn print_preferences(preferences: &Preferences) {
    let on_off = |flag: bool| if flag { "on" } else { "off" };
    println!("Dark mode: {}", on_off(preferences.dark_mode));
    println!("Reminders: {}", on_off(preferences.reminders));
    println!("Crisis mode: {}", on_off(preferences.crisis_mode));
}

fn open_store(config: &Config) -> AppResult<PooledConnection> {
    let db = Database::open(&config.database_path())?;
    db.initialize_schema()?;
    db.get_conn()
}

async fn run_journal(
    command: JournalCommand,
    conn: &PooledConnection,
    service: &TextGenerationService,
    session: &Session,
    today: NaiveDate,
) -> AppResult<()> {
    match command {
        JournalCommand::Write(WriteArgs {
            title,
            content,
            tags,
            prompt,
        }) => {
            let draft = JournalDraft {
                title,
                content,
                tags,
                prompt,
            };
            let entry = ops::write_entry(conn, service, session, &draft, today).await?;
            println!("Saved entry {} ({})", entry.id, entry.sentiment.unwrap_or_default());
        }
        JournalCommand::List => {
            let entries = ops::list_entries(conn, session)?;
            if entries.is_empty() {
                println!("No journal entries yet.");
            }
            for entry in entries {
                println!(
                    "{}  {}  {} {}",
                    entry.id,
                    entry.date,
                    entry.mood.emoji(),
                    entry.title
                );
                if let Some(sentiment) = entry.sentiment {
                    println!("    sentiment: {}", sentiment);
                }
                if !entry.tags.is_empty() {
                    println!("    tags: {}", entry.tags.join(", "));
                }
                println!("    {}", entry.content);
            }
        }
        JournalCommand::Edit(edit_args) => {
            let edit = edit_from_args(&edit_args)?;
            let entry = ops::edit_entry(conn, service, session, edit_args.id, &edit).await?;
            println!("Updated entry {}", entry.id);
        }
        JournalCommand::Delete { id } => {
            ops::delete_entry(conn, session, id)?;
            println!("Deleted entry {}", id);
        }
    }
    Ok(())
}

fn edit_from_args(args: &EditArgs) -> AppResult<JournalEdit> {
    Ok(JournalEdit {
        title: args.title.clone(),
        content: args.content.clone(),
        mood: args.mood.map(MoodLevel::new).transpose()?,
        tags: args.tag_change(),
    })
}

fn print_insights(insights: &ops::Insights) {
    if insights.is_empty() {
        println!("Your journey starts here. Check in or write an entry to see insights.");
        return;
    }

    println!(
        "Average mood: {}",
        insights.average_display().unwrap_or_else(|| "-".to_string())
    );
    println!("Total entries: {}", insights.total_entries);
    println!("Check-ins this week: {}", insights.check_ins_this_week);

    if !insights.trend.is_empty() {
        println!("\nMood trend:");
        for point in &insights.trend {
            println!(
                "  {}  {} {}",
                point.date.format(DATE_FORMAT_SHORT),
                "#".repeat(usize::from(point.mood.value())),
                point.mood
            );
        }
    }

    if !insights.mood_distribution.is_empty() {
        println!("\nMood distribution:");
        for (level, count) in &insights.mood_distribution {
            println!("  {:<8} {}", level.label(), count);
        }
    }

    if !insights.sentiment_distribution.is_empty() {
        println!("\nJournal sentiment:");
        for (sentiment, count) in &insights.sentiment_distribution {
            println!("  {:<8} {}", sentiment, count);
        }
    }

    if let Some(level) = insights.most_common_mood {
        println!(
            "\nYour most common mood level is {}.",
            level.label().to_lowercase()
        );
    }
}

async fn breathe(cycles: u32) {
    info!("Starting breathing exercise ({} cycles)", cycles);
    println!("4-4-6 Breathing Exercise");

    let mut state = Breathing::default().apply(BreathEvent::Toggle);
    let mut ticker = tokio::time::interval(Duration::from_secs(1));

    for _ in 0..cycles.saturating_mul(Breathing::cycle_len()) {
        ticker.tick().await;
        if state.count == 0 {
            println!("\n{} - {}", state.phase, state.instruction());
        }
        println!("  {}", state.count + 1);
        state = state.apply(BreathEvent::Tick);
    }

    println!("\nWell done.");
}
