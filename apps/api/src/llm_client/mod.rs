/// LLM Client: the single point of entry for all Gemini API calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// All LLM interactions MUST go through a `CompletionProvider`.
///
/// Calls are spaced by a shared `RateLimiter` and are never retried here;
/// callers decide whether a transport failure is worth another attempt.
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

pub mod prompts;
pub mod rate_limiter;

use rate_limiter::RateLimiter;

const GENERATION_TEMPERATURE: f32 = 0.3;
const RESPONSE_MIME_TYPE: &str = "application/json";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed response envelope: {0}")]
    MalformedEnvelope(#[from] serde_json::Error),

    #[error("LLM response did not contain completion text")]
    MissingCompletion,
}

/// Anything that can turn a prompt into raw completion text.
///
/// Carried in `AppState` as `Arc<dyn CompletionProvider>`.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Extracts the text of the first part of the first candidate.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Wraps the Gemini `generateContent` API with a shared minimum-interval limiter.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    endpoint: String,
    api_key: String,
    limiter: Arc<RateLimiter>,
}

impl LlmClient {
    pub fn new(
        api_url: &str,
        model: &str,
        api_key: String,
        min_interval: Duration,
    ) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint: format!(
                "{}/models/{}:generateContent",
                api_url.trim_end_matches('/'),
                model
            ),
            api_key,
            limiter: Arc::new(RateLimiter::new(min_interval)),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, LlmError> {
        Self::new(
            &config.gemini_api_url,
            &config.gemini_model,
            config.gemini_api_key.clone(),
            config.llm_min_interval,
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Makes a single rate-limited call to Gemini and returns the completion text.
    pub async fn call(&self, prompt: &str, max_tokens: u32) -> Result<String, LlmError> {
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: GENERATION_TEMPERATURE,
                max_output_tokens: max_tokens,
                response_mime_type: RESPONSE_MIME_TYPE,
            },
        };

        let waited = self.limiter.acquire().await;
        debug!(
            "Dispatching LLM call after {}ms in queue (min interval {}ms)",
            waited.as_millis(),
            self.limiter.min_interval().as_millis()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", &self.api_key)])
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("LLM API returned {}", status);
            // Prefer the provider's own message when the body carries one
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: GenerateContentResponse = serde_json::from_str(&body)?;
        let text = envelope.text().ok_or(LlmError::MissingCompletion)?;

        debug!("LLM call succeeded: {} chars of completion", text.len());

        Ok(text.to_string())
    }
}

#[async_trait]
impl CompletionProvider for LlmClient {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, LlmError> {
        self.call(prompt, max_tokens).await
    }
}
