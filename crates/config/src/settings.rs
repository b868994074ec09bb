//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ConfigError;

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    #[default]
    Development,
    Staging,
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// External language-model classification
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Static product catalog
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Record pipeline behaviour
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Logging configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Enable CORS origin restrictions
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// CORS allowed origins
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_timeout() -> u64 {
    30
}
fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_seconds: default_timeout(),
            cors_enabled: true,
            cors_origins: Vec::new(),
        }
    }
}

/// External classification service configuration
///
/// The provider is chosen from the credential: OpenRouter keys start with
/// `sk-or-`, anything else is treated as a Google Gemini key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Disable to always use the deterministic heuristic
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Provider credential. Without one the heuristic result is used.
    #[serde(default = "default_api_key")]
    pub api_key: Option<String>,

    /// Model override; each provider has its own default
    #[serde(default = "default_model")]
    pub model: Option<String>,

    #[serde(default = "default_openrouter_endpoint")]
    pub openrouter_endpoint: String,

    #[serde(default = "default_gemini_endpoint")]
    pub gemini_endpoint: String,

    /// Outbound request timeout in seconds
    #[serde(default = "default_classifier_timeout")]
    pub timeout_seconds: u64,

    /// Sampling temperature; classification must be deterministic
    #[serde(default)]
    pub temperature: f32,
}

fn default_api_key() -> Option<String> {
    ["WIXWATCHSEARCH", "GEMINI_API_KEY"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

fn default_model() -> Option<String> {
    std::env::var("GEMINI_MODEL")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn default_openrouter_endpoint() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_gemini_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_classifier_timeout() -> u64 {
    20
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: default_api_key(),
            model: default_model(),
            openrouter_endpoint: default_openrouter_endpoint(),
            gemini_endpoint: default_gemini_endpoint(),
            timeout_seconds: default_classifier_timeout(),
            temperature: 0.0,
        }
    }
}

impl ClassifierConfig {
    /// Credential, if one is configured and non-blank
    pub fn credential(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}

/// Static product catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON file mapping model keys to product records
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

fn default_catalog_path() -> String {
    std::env::var("MODEL_SPECS_CATALOG").unwrap_or_else(|_| "model_specs_catalog.json".to_string())
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

/// Record pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Reject codes whose series is not recognized (SERIES_CODE_NOT_IDENTIFIED)
    #[serde(default)]
    pub require_known_series: bool,

    /// Maximum number of model codes accepted by one batch request
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
}

fn default_max_batch_size() -> usize {
    200
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            require_known_series: false,
            max_batch_size: default_max_batch_size(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl Settings {
    /// Load from a single YAML or TOML file, chosen by extension
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;

        let settings: Settings = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&content)?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            other => {
                return Err(ConfigError::ParseError(format!(
                    "Unsupported config format: {:?}",
                    other
                )))
            }
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_classifier()?;
        self.validate_pipeline()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        let server = &self.server;

        if server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "Port cannot be 0".to_string(),
            });
        }

        if server.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.timeout_seconds".to_string(),
                message: "Timeout must be at least 1 second".to_string(),
            });
        }

        if self.environment.is_production() && !server.cors_enabled {
            tracing::warn!("CORS is disabled in production");
        }

        Ok(())
    }

    fn validate_classifier(&self) -> Result<(), ConfigError> {
        let classifier = &self.classifier;

        if classifier.timeout_seconds == 0 || classifier.timeout_seconds > 300 {
            return Err(ConfigError::InvalidValue {
                field: "classifier.timeout_seconds".to_string(),
                message: format!(
                    "Must be between 1 and 300 seconds, got {}",
                    classifier.timeout_seconds
                ),
            });
        }

        // Identical inputs must classify identically
        if classifier.temperature != 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "classifier.temperature".to_string(),
                message: format!(
                    "Must be 0 for deterministic output, got {}",
                    classifier.temperature
                ),
            });
        }

        for (field, endpoint) in [
            ("classifier.openrouter_endpoint", &classifier.openrouter_endpoint),
            ("classifier.gemini_endpoint", &classifier.gemini_endpoint),
        ] {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    message: format!("Not an HTTP(S) URL: {}", endpoint),
                });
            }
        }

        Ok(())
    }

    fn validate_pipeline(&self) -> Result<(), ConfigError> {
        if self.pipeline.max_batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pipeline.max_batch_size".to_string(),
                message: "Must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Load settings from `config/default`, `config/{env}` and the environment
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from("config", env)
}

/// Load settings with an explicit configuration directory
pub fn load_settings_from(dir: &str, env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    // Load default config
    builder = builder.add_source(File::with_name(&format!("{}/default", dir)).required(false));

    // Load environment-specific config
    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("{}/{}", dir, env_name)).required(false));
    }

    // Load from environment variables
    builder = builder.add_source(
        Environment::with_prefix("WATCH_CATALOG")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.classifier.temperature, 0.0);
        assert_eq!(settings.pipeline.max_batch_size, 200);
        assert!(!settings.pipeline.require_known_series);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = Settings::default();
        settings.server.port = 0;
        assert!(settings.validate().is_err());

        settings.server.port = 9000;
        settings.classifier.temperature = 0.7;
        assert!(settings.validate().is_err());

        settings.classifier.temperature = 0.0;
        settings.classifier.timeout_seconds = 0;
        assert!(settings.validate().is_err());

        settings.classifier.timeout_seconds = 10;
        settings.classifier.gemini_endpoint = "ftp://example".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_credential_trims_blank() {
        let mut classifier = ClassifierConfig::default();
        classifier.api_key = Some("   ".to_string());
        assert_eq!(classifier.credential(), None);
        classifier.api_key = Some(" sk-or-abc ".to_string());
        assert_eq!(classifier.credential(), Some("sk-or-abc"));
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            concat!(
                "server:\n  port: 9191\n",
                "pipeline:\n  require_known_series: true\n  max_batch_size: 5\n",
                "classifier:\n  api_key: sk-or-test\n  model: openai/gpt-4o-mini"
            )
        )
        .unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.server.port, 9191);
        assert!(settings.pipeline.require_known_series);
        assert_eq!(settings.pipeline.max_batch_size, 5);
        assert_eq!(settings.classifier.credential(), Some("sk-or-test"));
        assert_eq!(settings.classifier.model.as_deref(), Some("openai/gpt-4o-mini"));
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[catalog]\npath = \"data/catalog.json\"\n[observability]\nlog_json = true"
        )
        .unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.catalog.path, "data/catalog.json");
        assert!(settings.observability.log_json);
    }

    #[test]
    fn test_from_file_missing() {
        let err = Settings::from_file("/nonexistent/settings.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_load_settings_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.yaml"),
            "server:\n  port: 7070\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("staging.yaml"),
            "environment: staging\nserver:\n  timeout_seconds: 12\n",
        )
        .unwrap();

        let dir_str = dir.path().to_str().unwrap();
        let settings = load_settings_from(dir_str, Some("staging")).unwrap();
        assert_eq!(settings.server.port, 7070);
        assert_eq!(settings.server.timeout_seconds, 12);
        assert_eq!(settings.environment, RuntimeEnvironment::Staging);
    }
}
