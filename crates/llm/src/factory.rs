//! LLM Factory - provider selection
//!
//! The provider is detected from the credential itself: OpenRouter keys carry
//! the `sk-or-` prefix, every other key is sent to Google Gemini.

use std::sync::Arc;
use std::time::Duration;

use watch_catalog_config::ClassifierConfig;

use crate::backend::{BackendConfig, GeminiBackend, LlmBackend, OpenRouterBackend};
use crate::LlmError;

/// LLM provider type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    /// OpenRouter chat completions (OpenAI-compatible)
    OpenRouter,
    /// Google Gemini generateContent
    Gemini,
}

impl LlmProvider {
    /// Detect the provider from a credential
    pub fn from_api_key(api_key: &str) -> Self {
        if api_key.trim().starts_with("sk-or-") {
            LlmProvider::OpenRouter
        } else {
            LlmProvider::Gemini
        }
    }

    /// Model used when none is configured
    pub fn default_model(&self) -> &'static str {
        match self {
            LlmProvider::OpenRouter => "google/gemini-2.5-pro",
            LlmProvider::Gemini => "gemini-1.5-pro",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LlmProvider::OpenRouter => "openrouter",
            LlmProvider::Gemini => "gemini",
        }
    }
}

/// Unified LLM provider configuration
#[derive(Debug, Clone)]
pub struct LlmProviderConfig {
    pub provider: LlmProvider,
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub timeout: Duration,
}

impl LlmProviderConfig {
    /// Create OpenRouter config with the default endpoint and model
    pub fn openrouter(api_key: impl Into<String>) -> Self {
        Self::for_provider(LlmProvider::OpenRouter, api_key.into(), "https://openrouter.ai/api/v1")
    }

    /// Create Gemini config with the default endpoint and model
    pub fn gemini(api_key: impl Into<String>) -> Self {
        Self::for_provider(
            LlmProvider::Gemini,
            api_key.into(),
            "https://generativelanguage.googleapis.com/v1beta",
        )
    }

    fn for_provider(provider: LlmProvider, api_key: String, endpoint: &str) -> Self {
        Self {
            provider,
            api_key,
            endpoint: endpoint.to_string(),
            model: provider.default_model().to_string(),
            temperature: 0.0,
            timeout: Duration::from_secs(20),
        }
    }

    /// Build from application settings.
    ///
    /// Returns `None` when classification is disabled or no credential is set.
    pub fn from_settings(settings: &ClassifierConfig) -> Option<Self> {
        if !settings.enabled {
            return None;
        }
        let api_key = settings.credential()?.to_string();
        let (config, endpoint) = match LlmProvider::from_api_key(&api_key) {
            LlmProvider::OpenRouter => (Self::openrouter(api_key), &settings.openrouter_endpoint),
            LlmProvider::Gemini => (Self::gemini(api_key), &settings.gemini_endpoint),
        };

        let mut config = config
            .with_endpoint(endpoint.as_str())
            .with_timeout(Duration::from_secs(settings.timeout_seconds));
        if let Some(model) = &settings.model {
            config = config.with_model(model.as_str());
        }
        config.temperature = settings.temperature;

        Some(config)
    }

    /// Set model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Factory for creating LLM backends
pub struct LlmFactory;

impl LlmFactory {
    pub fn create_backend(config: &LlmProviderConfig) -> Result<Arc<dyn LlmBackend>, LlmError> {
        let backend_config = BackendConfig {
            api_key: config.api_key.clone(),
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            timeout: config.timeout,
        };

        tracing::debug!(
            provider = config.provider.name(),
            model = %config.model,
            "Creating LLM backend"
        );

        match config.provider {
            LlmProvider::OpenRouter => Ok(Arc::new(OpenRouterBackend::new(backend_config)?)),
            LlmProvider::Gemini => Ok(Arc::new(GeminiBackend::new(backend_config)?)),
        }
    }

    /// Create a backend from settings, if classification is configured
    pub fn from_settings(
        settings: &ClassifierConfig,
    ) -> Result<Option<Arc<dyn LlmBackend>>, LlmError> {
        LlmProviderConfig::from_settings(settings)
            .map(|config| Self::create_backend(&config))
            .transpose()
    }
}
