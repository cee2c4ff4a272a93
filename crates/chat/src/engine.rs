//! Answering-engine boundary.
//!
//! The engine is an external collaborator: a single `generate` operation
//! taking a prompt string and returning a text reply. The production
//! implementation talks to the Gemini `generateContent` REST API; a
//! deterministic stub backs tests and the `--engine stub` development mode.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";

const GENERATE_URL_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// System instruction sent once per request alongside the assembled prompt.
const SYSTEM_INSTRUCTION: &str = "\
You are the Carbon Insight assistant, a BIM and embodied-carbon consultant.\n\
You receive the relevant project data in each user message.\n\
Always use the pre-computed aggregated data you are given.\n\
Use Portuguese (PT-BR) for all user-facing responses.\n\
Format with Markdown and bold key metrics.";

#[derive(Error, Debug)]
pub enum EngineError {
    /// Rate limit, timeout or network failure; a single fresh retry is
    /// acceptable.
    #[error("transient engine failure: {0}")]
    Transient(String),

    /// Auth or configuration failure; must abort startup, never be retried
    /// per request.
    #[error("fatal engine failure: {0}")]
    Fatal(String),

    /// The engine answered, but not in the shape we expect.
    #[error("malformed engine response: {0}")]
    Protocol(String),
}

impl EngineError {
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

/// Black-box text-completion service.
#[async_trait]
pub trait AnsweringEngine: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, EngineError>;
}

// Gemini REST client

#[derive(Debug)]
pub struct GeminiEngine {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiEngine {
    /// Build a client. An empty key is a configuration error and must abort
    /// startup.
    pub fn new(api_key: impl Into<String>) -> Result<Self, EngineError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(EngineError::Fatal("API key is missing".to_string()));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
        })
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl AnsweringEngine for GeminiEngine {
    async fn generate(&self, prompt: &str) -> Result<String, EngineError> {
        let url = format!("{GENERATE_URL_BASE}/{}:generateContent", self.model);
        let body = json!({
            "system_instruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] },
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
        });

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| EngineError::Transient(format!("request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(classify_http_failure(status, &detail));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|err| EngineError::Protocol(format!("invalid JSON body: {err}")))?;

        let text: String = parsed
            .candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(EngineError::Protocol(
                "response contained no candidate text".to_string(),
            ));
        }

        Ok(text)
    }
}

fn classify_http_failure(status: reqwest::StatusCode, detail: &str) -> EngineError {
    use reqwest::StatusCode;

    let message = format!("HTTP {status}: {}", detail.trim());
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => EngineError::Fatal(message),
        StatusCode::TOO_MANY_REQUESTS => EngineError::Transient(message),
        status if status.is_server_error() => EngineError::Transient(message),
        _ => EngineError::Protocol(message),
    }
}

// Deterministic stub for tests and local development

/// Stub engine: either a canned reply, or an echo of the prompt (useful for
/// asserting on assembled prompt content end to end).
pub struct StubEngine {
    reply: Option<String>,
}

impl StubEngine {
    #[must_use]
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
        }
    }

    /// Echo the assembled prompt back as the reply.
    #[must_use]
    pub fn echo() -> Self {
        Self { reply: None }
    }
}

#[async_trait]
impl AnsweringEngine for StubEngine {
    async fn generate(&self, prompt: &str) -> Result<String, EngineError> {
        Ok(self
            .reply
            .clone()
            .unwrap_or_else(|| prompt.to_string()))
    }
}
