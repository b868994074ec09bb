//! LLM Backend implementations
//!
//! Two providers are supported, both called once per classification with no
//! retry. Any failure surfaces as an [`LlmError`]; callers decide how to
//! degrade.
//!
//! - [`OpenRouterBackend`]: OpenAI-compatible chat completions with JSON mode
//! - [`GeminiBackend`]: Google `generateContent` with a JSON response MIME type

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::LlmError;

/// LLM Backend trait
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Send one prompt and return the raw model text
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    /// Get model name
    fn model_name(&self) -> &str;
}

/// Connection settings shared by both backends
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub api_key: String,
    /// Base URL without a trailing path for the call itself
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub timeout: Duration,
}

fn build_client(timeout: Duration) -> Result<Client, LlmError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LlmError::Configuration(format!("Failed to create HTTP client: {}", e)))
}

async fn read_success(response: reqwest::Response) -> Result<serde_json::Value, LlmError> {
    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        return Err(LlmError::Api(format!("HTTP {}: {}", status, error_text)));
    }

    response
        .json()
        .await
        .map_err(|e| LlmError::InvalidResponse(e.to_string()))
}

// =============================================================================
// OpenRouter (OpenAI-compatible chat completions)
// =============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    response_format: ResponseFormat,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Extract `choices[0].message.content`
pub(crate) fn parse_chat_completion(body: serde_json::Value) -> Result<String, LlmError> {
    let response: ChatResponse =
        serde_json::from_value(body).map_err(|e| LlmError::InvalidResponse(e.to_string()))?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| LlmError::InvalidResponse("No choices in response".to_string()))
}

/// OpenRouter chat-completions backend
#[derive(Clone)]
pub struct OpenRouterBackend {
    config: BackendConfig,
    client: Client,
}

impl OpenRouterBackend {
    pub fn new(config: BackendConfig) -> Result<Self, LlmError> {
        if config.api_key.is_empty() {
            return Err(LlmError::Configuration("API key required".to_string()));
        }
        let client = build_client(config.timeout)?;
        Ok(Self { config, client })
    }

    fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.config.endpoint.trim_end_matches('/'))
    }

    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", self.config.api_key);
        if let Ok(val) = HeaderValue::from_str(&auth_value) {
            headers.insert(AUTHORIZATION, val);
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }
}

#[async_trait]
impl LlmBackend for OpenRouterBackend {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: &self.config.model,
            temperature: self.config.temperature,
            response_format: ResponseFormat { kind: "json_object" },
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(self.chat_url())
            .headers(self.build_headers())
            .json(&request)
            .send()
            .await?;

        let body = read_success(response).await?;
        parse_chat_completion(body)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

// =============================================================================
// Google Gemini
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiCandidateContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidatePart {
    #[serde(default)]
    text: Option<String>,
}

/// Extract `candidates[0].content.parts[0].text`
pub(crate) fn parse_gemini(body: serde_json::Value) -> Result<String, LlmError> {
    let response: GeminiResponse =
        serde_json::from_value(body).map_err(|e| LlmError::InvalidResponse(e.to_string()))?;
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .ok_or_else(|| LlmError::InvalidResponse("No candidates in response".to_string()))
}

/// Google Gemini `generateContent` backend
#[derive(Clone)]
pub struct GeminiBackend {
    config: BackendConfig,
    client: Client,
}

impl GeminiBackend {
    pub fn new(config: BackendConfig) -> Result<Self, LlmError> {
        if config.api_key.is_empty() {
            return Err(LlmError::Configuration("API key required".to_string()));
        }
        let client = build_client(config.timeout)?;
        Ok(Self { config, client })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }

    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(val) = HeaderValue::from_str(&self.config.api_key) {
            headers.insert("x-goog-api-key", val);
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }
}

#[async_trait]
impl LlmBackend for GeminiBackend {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                response_mime_type: "application/json",
            },
        };

        let response = self
            .client
            .post(self.generate_url())
            .headers(self.build_headers())
            .json(&request)
            .send()
            .await?;

        let body = read_success(response).await?;
        parse_gemini(body)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
