//! Optional language-model classification
//!
//! The model is asked once per classification. Whatever comes back is
//! clamped against the heuristic result and pushed through the same gate, so
//! a misbehaving provider can only ever produce a legal bundle. Any failure
//! degrades to the heuristic result.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use watch_catalog_config::ClassifierConfig;
use watch_catalog_core::{AttributeBundle, Attributes, RawAttributes};
use watch_catalog_llm::{build_classifier_prompt, extract_json_object, LlmBackend, LlmFactory};

use crate::context::RuleContext;
use crate::heuristic::classify_heuristic;
use crate::validation::finalize;

/// Which path produced a bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationSource {
    /// No backend configured
    Heuristic,
    /// Backend answered with a usable JSON object
    Ai,
    /// Backend configured but the call or its output failed
    Fallback,
}

/// Gated attributes plus their provenance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub attributes: Attributes,
    pub source: ClassificationSource,
}

/// Classifier that consults a language model when one is configured
#[derive(Clone)]
pub struct AiClassifier {
    backend: Option<Arc<dyn LlmBackend>>,
}

impl AiClassifier {
    pub fn new(backend: Option<Arc<dyn LlmBackend>>) -> Self {
        Self { backend }
    }

    /// Classifier that never calls out
    pub fn heuristic_only() -> Self {
        Self { backend: None }
    }

    /// Build from settings. A backend that cannot be created is logged and
    /// the classifier runs heuristic-only.
    pub fn from_settings(config: &ClassifierConfig) -> Self {
        match LlmFactory::from_settings(config) {
            Ok(Some(backend)) => {
                tracing::info!(model = backend.model_name(), "AI classification enabled");
                Self::new(Some(backend))
            }
            Ok(None) => {
                tracing::info!("No AI credential configured, using heuristic classification");
                Self::heuristic_only()
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Failed to create AI backend, using heuristic classification"
                );
                Self::heuristic_only()
            }
        }
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    /// Classify a model. Never fails.
    pub async fn classify(&self, model: &str, brand_hint: &str) -> Classification {
        let heuristic = classify_heuristic(model, brand_hint);

        let Some(backend) = &self.backend else {
            return Classification {
                attributes: heuristic,
                source: ClassificationSource::Heuristic,
            };
        };

        let prompt = build_classifier_prompt(model, brand_hint);
        let text = match backend.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!(
                    model = %model,
                    error = %e,
                    "AI classification failed, using heuristic"
                );
                return fallback(heuristic);
            }
        };

        let parsed = extract_json_object(&text);
        let Some(raw) = parsed.as_ref().and_then(RawAttributes::from_json) else {
            tracing::debug!(model = %model, "AI response had no JSON object, using heuristic");
            return fallback(heuristic);
        };

        let ctx = RuleContext::new(model, brand_hint);
        let attributes = finalize(&AttributeBundle::from(raw.clamp_with(&heuristic)), &ctx);

        tracing::info!(
            model = %model,
            backend = backend.model_name(),
            changed = attributes != heuristic,
            "AI classification applied"
        );

        Classification {
            attributes,
            source: ClassificationSource::Ai,
        }
    }
}

fn fallback(attributes: Attributes) -> Classification {
    Classification {
        attributes,
        source: ClassificationSource::Fallback,
    }
}
