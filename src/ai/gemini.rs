//! Gemini generateContent client.
//!
//! This module provides the wire types for the generateContent endpoint, the
//! `GenerativeTransport` trait the text-generation service is written against,
//! and `GeminiTransport`, its reqwest implementation.

use crate::config::ApiKey;
use crate::errors::AIError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Request body for generateContent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

impl GenerateRequest {
    /// A single-turn request carrying `instruction` as its only text part.
    pub fn single_turn(
        instruction: impl Into<String>,
        temperature: f32,
        max_output_tokens: u32,
    ) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: instruction.into(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature,
                max_output_tokens,
            },
        }
    }

    /// The instruction text of the first part, if any.
    pub fn instruction(&self) -> Option<&str> {
        self.contents
            .first()
            .and_then(|c| c.parts.first())
            .map(|p| p.text.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// Sampling parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationConfig {
    pub temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    pub max_output_tokens: u32,
}

/// Response body from generateContent. Every level is optional because the
/// API omits fields for blocked or truncated candidates.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Extracts `candidates[0].content.parts[0].text` from a response body.
///
/// # Errors
///
/// Returns `AIError::InvalidResponse` if the body is not JSON of the expected
/// shape or the text is missing.
pub fn parse_generated_text(body: &str) -> Result<String, AIError> {
    let response: GenerateResponse = serde_json::from_str(body).map_err(|e| {
        AIError::InvalidResponse(format!("Failed to parse generateContent response: {}", e))
    })?;

    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .ok_or_else(|| AIError::InvalidResponse("Response carried no candidate text".to_string()))
}

/// Something that can turn a generateContent request into generated text.
///
/// The text-generation service owns time budgets and fallbacks; transports
/// only perform one attempt and report what went wrong.
#[async_trait]
pub trait GenerativeTransport: Send + Sync {
    /// Sends one request and returns the raw candidate text.
    async fn generate(&self, request: &GenerateRequest) -> Result<String, AIError>;
}

/// Client for the hosted generateContent endpoint.
pub struct GeminiTransport {
    endpoint: String,
    api_key: ApiKey,
    client: Client,
}

impl GeminiTransport {
    /// Creates a new transport.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Full generateContent URL, without query string
    /// * `api_key` - Credential sent as the `key` query parameter
    pub fn new(endpoint: impl Into<String>, api_key: ApiKey) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key,
            client: Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GenerativeTransport for GeminiTransport {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, AIError> {
        debug!(
            "Sending generateContent request (temperature {}, max tokens {})",
            request.generation_config.temperature, request.generation_config.max_output_tokens
        );

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.expose())])
            .json(request)
            .send()
            .await
            .map_err(AIError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AIError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(AIError::Transport)?;
        let text = parse_generated_text(&body)?;

        debug!("Received generateContent response ({} chars)", text.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serializes_to_wire_shape() {
        let request = GenerateRequest::single_turn("Say hi", 0.7, 100);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["contents"][0]["parts"][0]["text"], "Say hi");
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 100);
        let temperature = value["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_instruction_accessor() {
        let request = GenerateRequest::single_turn("classify this", 0.1, 10);
        assert_eq!(request.instruction(), Some("classify this"));
    }

    #[test]
    fn test_parse_generated_text_reads_first_candidate() {
        let body = json!({
            "candidates": [
                {"content": {"parts": [{"text": "first"}, {"text": "second"}]}},
                {"content": {"parts": [{"text": "other"}]}}
            ]
        })
        .to_string();
        assert_eq!(parse_generated_text(&body).unwrap(), "first");
    }

    #[test]
    fn test_parse_generated_text_rejects_missing_text() {
        for body in [
            r#"{"candidates": []}"#,
            r#"{}"#,
            r#"{"candidates": [{"finishReason": "SAFETY"}]}"#,
            r#"{"candidates": [{"content": {"parts": []}}]}"#,
        ] {
            assert!(
                matches!(parse_generated_text(body), Err(AIError::InvalidResponse(_))),
                "expected InvalidResponse for {}",
                body
            );
        }
    }

    #[test]
    fn test_parse_generated_text_rejects_non_json() {
        assert!(matches!(
            parse_generated_text("<html>bad gateway</html>"),
            Err(AIError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_parse_keeps_empty_text_for_caller_to_judge() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":""}]}}]}"#;
        assert_eq!(parse_generated_text(body).unwrap(), "");
    }

    #[test]
    fn test_transport_creation() {
        let transport = GeminiTransport::new(
            "http://localhost:8080/generate",
            ApiKey::new("k").unwrap(),
        );
        assert_eq!(transport.endpoint(), "http://localhost:8080/generate");
    }
}
