/*!
# moodwell

moodwell is a journaling and mood-tracking companion. It records daily mood
check-ins and journal entries in a local SQLite store, suggests reflective
journal prompts, labels the sentiment of entries, and summarizes a user's
history.

Prompts and sentiment labels come from a hosted generative-language API when a
key is configured. Every call has a time budget, and any failure (no key,
network error, timeout, unexpected reply) falls back to a local answer, so
callers always get a usable value.

## Architecture

- `ai`: Text-generation service (Gemini transport, prompts, fallbacks)
- `cli`: Command-line interface handling using clap
- `config`: Configuration loading and validation
- `db`: Row store for profiles, mood check-ins and journal entries
- `errors`: Error handling infrastructure
- `mindfulness`: Breathing, affirmation and sleep-story exercises
- `models`: Mood and sentiment value types
- `ops`: Check-in, journal and insights workflows
- `resources`: Crisis lines and support directory
- `session`: Signed-in identity

## Usage Example

```rust,no_run
use moodwell::ai::TextGenerationService;
use moodwell::Config;

#[tokio::main]
async fn main() -> moodwell::AppResult<()> {
    let config = Config::load()?;
    config.validate()?;

    let service = TextGenerationService::from_settings(&config.ai);
    println!("{}", service.generate_prompt(4, &[]).await);
    Ok(())
}
```
*/

pub mod ai;
/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
pub mod constants;
pub mod db;
/// Error types and utilities for error handling
pub mod errors;
pub mod mindfulness;
pub mod models;
pub mod ops;
pub mod resources;
pub mod session;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use models::{MoodLevel, Sentiment};
