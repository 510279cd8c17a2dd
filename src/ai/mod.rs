//! AI-assisted journaling: reflection prompts and sentiment tags.
//!
//! This module provides integration with the Gemini generateContent API,
//! always backed by a deterministic local fallback so that journaling works
//! the same with or without a credential.
//!
//! # Module Structure
//!
//! - `gemini`: wire types, the `GenerativeTransport` seam and the HTTP client
//! - `prompts`: instruction builders and the fallback prompt table
//! - `service`: `TextGenerationService`, time budgets and fallback policy
//!
//! # Example
//!
//! ```no_run
//! use moodwell::ai::TextGenerationService;
//! use moodwell::Config;
//!
//! # async fn run() -> moodwell::AppResult<()> {
//! let config = Config::load()?;
//! let service = TextGenerationService::from_settings(&config.ai);
//! let prompt = service.generate_prompt(3, &[]).await;
//! println!("{}", prompt);
//! # Ok(())
//! # }
//! ```

pub mod gemini;
pub mod prompts;
pub mod service;

// Re-export commonly used types
pub use gemini::{GeminiTransport, GenerateRequest, GenerativeTransport};
pub use service::{AiMode, FallbackReason, Generated, TextGenerationService};
