//! LLM backend trait and the Groq chat-completions implementation.
//!
//! Groq exposes an OpenAI-compatible endpoint, so the request/response
//! handling here works against any `/v1/chat/completions` server by
//! overriding the base URL.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
    #[error("API error [{status}]: {message}")]
    ApiError { status: u16, message: String },
}

// ── Request / Response ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,   // "system" | "user" | "assistant"
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmRequest {
    pub messages: Vec<Message>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    pub content: String,
    pub model: String,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

// ── Trait ─────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait LlmBackend: Send + Sync {
    async fn complete(&self, req: LlmRequest) -> Result<LlmResponse, LlmError>;
    fn model_id(&self) -> &str;
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_openai_response(json: &serde_json::Value, fallback_model: &str) -> LlmResponse {
    LlmResponse {
        content: json["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .to_string(),
        model: json["model"]
            .as_str()
            .unwrap_or(fallback_model)
            .to_string(),
        prompt_tokens:     json["usage"]["prompt_tokens"].as_u64().unwrap_or(0) as u32,
        completion_tokens: json["usage"]["completion_tokens"].as_u64().unwrap_or(0) as u32,
    }
}

async fn check_response_status(resp: reqwest::Response) -> Result<serde_json::Value, LlmError> {
    let status = resp.status().as_u16();
    if status == 429 {
        return Err(LlmError::RateLimitExceeded);
    }
    let body: serde_json::Value = resp.json().await?;
    if status >= 400 {
        let msg = body["error"]["message"]
            .as_str()
            .or_else(|| body["message"].as_str())
            .unwrap_or("unknown API error")
            .to_string();
        return Err(LlmError::ApiError { status, message: msg });
    }
    Ok(body)
}

// ── Groq (OpenAI-compatible) ──────────────────────────────────────────────────

pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct GroqBackend {
    pub base_url: String,
    pub model: String,
    api_key: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl GroqBackend {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: GROQ_BASE_URL.to_string(),
            model: model.into(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
            client: reqwest::Client::new(),
        }
    }

    /// Point at a different OpenAI-compatible endpoint (LMStudio, vLLM, …).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The service may be slow or unavailable; every call carries a timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl LlmBackend for GroqBackend {
    async fn complete(&self, req: LlmRequest) -> Result<LlmResponse, LlmError> {
        let url = format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'));
        let body = serde_json::json!({
            "model":       req.model.as_deref().unwrap_or(&self.model),
            "messages":    req.messages,
            "max_tokens":  req.max_tokens.unwrap_or(1024),
            "temperature": req.temperature.unwrap_or(0.3),
        });
        let resp = self.client
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await?;
        let json = check_response_status(resp).await?;
        Ok(parse_openai_response(&json, &self.model))
    }

    fn model_id(&self) -> &str { &self.model }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
