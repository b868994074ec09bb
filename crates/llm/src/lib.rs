//! Language-model integration for attribute classification
//!
//! Features:
//! - Provider backends (OpenRouter chat completions, Google Gemini)
//! - Provider detection from the credential format
//! - Deterministic classification prompt
//! - Tolerant JSON object extraction from model output

pub mod backend;
pub mod factory;
pub mod prompt;

pub use backend::{GeminiBackend, LlmBackend, OpenRouterBackend};
pub use factory::{LlmFactory, LlmProvider, LlmProviderConfig};
pub use prompt::{build_classifier_prompt, extract_json_object};

use thiserror::Error;

/// LLM errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Network(err.to_string())
        }
    }
}
