//! Journal-prompt generation and sentiment classification with local fallbacks.
//!
//! Both operations are best-effort enhancements over an always-available
//! default. Whatever happens on the wire, callers get a usable value back:
//! a prompt string, or one of the three sentiment labels.
//!
//! Internally each call produces a [`Generated`] value so the outcome (fresh
//! or degraded, and why) can be logged and tested without changing what the
//! caller receives.

use super::gemini::{GeminiTransport, GenerateRequest, GenerativeTransport};
use super::prompts::{journal_prompt_instruction, random_fallback_prompt, sentiment_instruction};
use crate::config::AiSettings;
use crate::constants::{
    PROMPT_MAX_OUTPUT_TOKENS, PROMPT_TEMPERATURE, PROMPT_TIMEOUT, SENTIMENT_MAX_OUTPUT_TOKENS,
    SENTIMENT_TEMPERATURE, SENTIMENT_TIMEOUT,
};
use crate::errors::AIError;
use crate::models::{MoodLevel, Sentiment};
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

/// Why a call degraded to its local default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// No credential configured; the network was never touched.
    Offline,
    /// Connection-level failure.
    Transport,
    /// Non-success HTTP status.
    Status(u16),
    /// The time budget elapsed and the request was dropped.
    Timeout,
    /// The body did not decode or had no candidate text.
    Malformed,
    /// The candidate text was empty or whitespace.
    Empty,
    /// The classifier answered something other than a valid label.
    InvalidLabel(String),
}

impl From<&AIError> for FallbackReason {
    fn from(err: &AIError) -> Self {
        match err {
            AIError::Transport(_) => FallbackReason::Transport,
            AIError::Status { status, .. } => FallbackReason::Status(*status),
            AIError::Timeout(_) => FallbackReason::Timeout,
            AIError::InvalidResponse(_) => FallbackReason::Malformed,
        }
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::Offline => f.write_str("no API key configured"),
            FallbackReason::Transport => f.write_str("transport failure"),
            FallbackReason::Status(code) => write!(f, "HTTP status {}", code),
            FallbackReason::Timeout => f.write_str("timed out"),
            FallbackReason::Malformed => f.write_str("malformed response"),
            FallbackReason::Empty => f.write_str("empty response"),
            FallbackReason::InvalidLabel(label) => write!(f, "invalid label {:?}", label),
        }
    }
}

/// Result of a text-generation call: a fresh value from the API, or the
/// local default together with the reason it was used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generated<T> {
    Fresh(T),
    Fallback { value: T, reason: FallbackReason },
}

impl<T> Generated<T> {
    pub fn value(&self) -> &T {
        match self {
            Generated::Fresh(value) | Generated::Fallback { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Generated::Fresh(value) | Generated::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Generated::Fallback { .. })
    }

    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match self {
            Generated::Fresh(_) => None,
            Generated::Fallback { reason, .. } => Some(reason),
        }
    }
}

/// Whether the service may reach the generative API. Resolved once at startup.
pub enum AiMode<T> {
    Offline,
    Online(T),
}

/// Generates journal prompts and classifies journal sentiment.
///
/// # Example
///
/// ```
/// use moodwell::ai::{prompts::FALLBACK_PROMPTS, TextGenerationService};
/// use moodwell::config::AiSettings;
/// use moodwell::Sentiment;
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// rt.block_on(async {
///     let service = TextGenerationService::from_settings(&AiSettings::Offline);
///     let prompt = service.generate_prompt(4, &[]).await;
///     assert!(FALLBACK_PROMPTS.contains(&prompt.as_str()));
///     assert_eq!(service.classify_sentiment("great day").await, Sentiment::Neutral);
/// });
/// ```
pub struct TextGenerationService<T = GeminiTransport> {
    mode: AiMode<T>,
}

impl TextGenerationService<GeminiTransport> {
    /// Builds the service from loaded configuration.
    pub fn from_settings(settings: &AiSettings) -> Self {
        match settings {
            AiSettings::Offline => Self::offline(),
            AiSettings::Online { api_key, endpoint } => {
                Self::online(GeminiTransport::new(endpoint.clone(), api_key.clone()))
            }
        }
    }
}

impl<T: GenerativeTransport> TextGenerationService<T> {
    /// A service that never touches the network.
    pub fn offline() -> Self {
        Self {
            mode: AiMode::Offline,
        }
    }

    /// A service that calls the API through `transport`.
    pub fn online(transport: T) -> Self {
        Self {
            mode: AiMode::Online(transport),
        }
    }

    pub fn is_online(&self) -> bool {
        matches!(self.mode, AiMode::Online(_))
    }

    /// Generates a reflective journal prompt for `mood`, using up to the last
    /// two entries of `recent` as context. Never fails.
    pub async fn generate_prompt(&self, mood: i64, recent: &[String]) -> String {
        self.generate_prompt_outcome(mood, recent).await.into_value()
    }

    /// Like [`generate_prompt`](Self::generate_prompt), but reports whether
    /// the prompt came from the API or from the fallback table.
    pub async fn generate_prompt_outcome(&self, mood: i64, recent: &[String]) -> Generated<String> {
        let transport = match &self.mode {
            AiMode::Offline => {
                debug!("No generative API key configured, using fallback prompt");
                return fallback_prompt(FallbackReason::Offline);
            }
            AiMode::Online(transport) => transport,
        };

        let level = MoodLevel::clamped(mood);
        if i64::from(level.value()) != mood {
            warn!("Mood {} outside 1-5, clamped to {}", mood, level);
        }

        let request = GenerateRequest::single_turn(
            journal_prompt_instruction(level, recent),
            PROMPT_TEMPERATURE,
            PROMPT_MAX_OUTPUT_TOKENS,
        );

        match call_with_budget(transport, &request, PROMPT_TIMEOUT).await {
            Ok(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    warn!("Generative API returned an empty prompt, using fallback");
                    fallback_prompt(FallbackReason::Empty)
                } else {
                    debug!("Generated journal prompt");
                    Generated::Fresh(trimmed.to_string())
                }
            }
            Err(err) => {
                warn!("Error generating journal prompt, using fallback: {}", err);
                fallback_prompt(FallbackReason::from(&err))
            }
        }
    }

    /// Classifies `text` as positive, neutral or negative. Never fails; any
    /// problem yields `Sentiment::Neutral`.
    pub async fn classify_sentiment(&self, text: &str) -> Sentiment {
        self.classify_sentiment_outcome(text).await.into_value()
    }

    /// Like [`classify_sentiment`](Self::classify_sentiment), but reports
    /// whether the label came from the API.
    pub async fn classify_sentiment_outcome(&self, text: &str) -> Generated<Sentiment> {
        let transport = match &self.mode {
            AiMode::Offline => {
                debug!("No generative API key configured, using neutral sentiment");
                return neutral(FallbackReason::Offline);
            }
            AiMode::Online(transport) => transport,
        };

        let request = GenerateRequest::single_turn(
            sentiment_instruction(text),
            SENTIMENT_TEMPERATURE,
            SENTIMENT_MAX_OUTPUT_TOKENS,
        );

        match call_with_budget(transport, &request, SENTIMENT_TIMEOUT).await {
            Ok(raw) => {
                let label = raw.to_lowercase().trim().to_string();
                match label.parse::<Sentiment>() {
                    Ok(sentiment) => {
                        debug!("Classified sentiment as {}", sentiment);
                        Generated::Fresh(sentiment)
                    }
                    Err(_) => {
                        warn!("Unrecognized sentiment label {:?}, using neutral", label);
                        neutral(FallbackReason::InvalidLabel(label))
                    }
                }
            }
            Err(err) => {
                warn!("Error analyzing sentiment, using neutral: {}", err);
                neutral(FallbackReason::from(&err))
            }
        }
    }
}

/// Runs one transport call under `budget`. When the budget elapses the
/// request future is dropped, which aborts the in-flight HTTP request.
async fn call_with_budget<T: GenerativeTransport>(
    transport: &T,
    request: &GenerateRequest,
    budget: Duration,
) -> Result<String, AIError> {
    match tokio::time::timeout(budget, transport.generate(request)).await {
        Ok(result) => result,
        Err(_) => Err(AIError::Timeout(budget)),
    }
}

fn fallback_prompt(reason: FallbackReason) -> Generated<String> {
    Generated::Fallback {
        value: random_fallback_prompt().to_string(),
        reason,
    }
}

fn neutral(reason: FallbackReason) -> Generated<Sentiment> {
    Generated::Fallback {
        value: Sentiment::Neutral,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::prompts::FALLBACK_PROMPTS;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replies with a fixed result and records each request.
    struct ScriptedTransport {
        reply: fn() -> Result<String, AIError>,
        seen: Mutex<Vec<GenerateRequest>>,
    }

    impl ScriptedTransport {
        fn new(reply: fn() -> Result<String, AIError>) -> Self {
            Self {
                reply,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn last_request(&self) -> GenerateRequest {
            self.seen.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl GenerativeTransport for ScriptedTransport {
        async fn generate(&self, request: &GenerateRequest) -> Result<String, AIError> {
            self.seen.lock().unwrap().push(request.clone());
            (self.reply)()
        }
    }

    #[tokio::test]
    async fn test_offline_prompt_is_fallback_member_for_every_mood() {
        let service: TextGenerationService<ScriptedTransport> = TextGenerationService::offline();
        for mood in 1..=5 {
            let outcome = service.generate_prompt_outcome(mood, &[]).await;
            assert_eq!(outcome.fallback_reason(), Some(&FallbackReason::Offline));
            assert!(FALLBACK_PROMPTS.contains(&outcome.value().as_str()));
        }
    }

    #[tokio::test]
    async fn test_offline_sentiment_is_neutral() {
        let service: TextGenerationService<ScriptedTransport> = TextGenerationService::offline();
        let outcome = service.classify_sentiment_outcome("I feel amazing").await;
        assert_eq!(
            outcome,
            Generated::Fallback {
                value: Sentiment::Neutral,
                reason: FallbackReason::Offline
            }
        );
    }

    #[tokio::test]
    async fn test_prompt_is_trimmed() {
        let service = TextGenerationService::online(ScriptedTransport::new(|| {
            Ok("  What made you smile today?  \n".to_string())
        }));
        let outcome = service.generate_prompt_outcome(4, &[]).await;
        assert_eq!(outcome, Generated::Fresh("What made you smile today?".to_string()));
    }

    #[tokio::test]
    async fn test_whitespace_prompt_falls_back() {
        let service = TextGenerationService::online(ScriptedTransport::new(|| Ok(" \n\t ".to_string())));
        let outcome = service.generate_prompt_outcome(2, &[]).await;
        assert_eq!(outcome.fallback_reason(), Some(&FallbackReason::Empty));
        assert!(FALLBACK_PROMPTS.contains(&outcome.value().as_str()));
    }

    #[tokio::test]
    async fn test_prompt_request_parameters() {
        let service = TextGenerationService::online(ScriptedTransport::new(|| Ok("Hi".to_string())));
        service.generate_prompt(5, &[]).await;

        let AiMode::Online(transport) = &service.mode else {
            panic!("expected online service");
        };
        let request = transport.last_request();
        assert_eq!(request.generation_config.temperature, PROMPT_TEMPERATURE);
        assert_eq!(request.generation_config.max_output_tokens, PROMPT_MAX_OUTPUT_TOKENS);
        assert!(request.instruction().unwrap().contains("excellent/amazing"));
    }

    #[tokio::test]
    async fn test_out_of_range_mood_is_clamped() {
        let service = TextGenerationService::online(ScriptedTransport::new(|| Ok("Hi".to_string())));
        service.generate_prompt(9, &[]).await;
        service.generate_prompt(-1, &[]).await;

        let AiMode::Online(transport) = &service.mode else {
            panic!("expected online service");
        };
        let seen = transport.seen.lock().unwrap();
        assert!(seen[0].instruction().unwrap().contains("excellent/amazing"));
        assert!(seen[1].instruction().unwrap().contains("very low/difficult"));
        assert!(!seen[0].instruction().unwrap().contains("undefined"));
    }

    #[tokio::test]
    async fn test_sentiment_label_normalization() {
        let service = TextGenerationService::online(ScriptedTransport::new(|| {
            Ok("  NEGATIVE\n".to_string())
        }));
        assert_eq!(
            service.classify_sentiment_outcome("rough day").await,
            Generated::Fresh(Sentiment::Negative)
        );

        let AiMode::Online(transport) = &service.mode else {
            panic!("expected online service");
        };
        let request = transport.last_request();
        assert_eq!(request.generation_config.temperature, SENTIMENT_TEMPERATURE);
        assert_eq!(
            request.generation_config.max_output_tokens,
            SENTIMENT_MAX_OUTPUT_TOKENS
        );
    }

    #[tokio::test]
    async fn test_sentiment_rejects_punctuated_label() {
        let service =
            TextGenerationService::online(ScriptedTransport::new(|| Ok("Positive!".to_string())));
        let outcome = service.classify_sentiment_outcome("text").await;
        assert_eq!(
            outcome,
            Generated::Fallback {
                value: Sentiment::Neutral,
                reason: FallbackReason::InvalidLabel("positive!".to_string())
            }
        );
    }

    #[tokio::test]
    async fn test_errors_map_to_fallback_reasons() {
        let service = TextGenerationService::online(ScriptedTransport::new(|| {
            Err(AIError::Status {
                status: 500,
                body: "boom".to_string(),
            })
        }));
        let outcome = service.classify_sentiment_outcome("text").await;
        assert_eq!(outcome.fallback_reason(), Some(&FallbackReason::Status(500)));
        assert_eq!(*outcome.value(), Sentiment::Neutral);

        let service = TextGenerationService::online(ScriptedTransport::new(|| {
            Err(AIError::InvalidResponse("no candidates".to_string()))
        }));
        let outcome = service.generate_prompt_outcome(3, &[]).await;
        assert_eq!(outcome.fallback_reason(), Some(&FallbackReason::Malformed));
    }

    #[test]
    fn test_fallback_reason_display() {
        assert_eq!(FallbackReason::Status(404).to_string(), "HTTP status 404");
        assert_eq!(FallbackReason::Timeout.to_string(), "timed out");
        assert!(FallbackReason::InvalidLabel("meh".into())
            .to_string()
            .contains("meh"));
    }

    #[test]
    fn test_from_settings_offline() {
        let service = TextGenerationService::from_settings(&AiSettings::Offline);
        assert!(!service.is_online());
    }
}
