//! End-to-end pipeline: raw text in, catalog record out

use std::sync::Arc;

use serde::Serialize;

use watch_catalog_config::Settings;
use watch_catalog_core::{Attributes, Brand, CatalogRecord, CatalogStore, Error, ModelCode, Result};

use crate::ai::{AiClassifier, Classification};
use crate::brand::{infer_brand, resolve_brand};
use crate::merge::merge_record;
use crate::parser::parse_model_code;

/// A parsed model together with its classification
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedModel {
    pub model_code: ModelCode,
    pub brand: Option<Brand>,
    #[serde(flatten)]
    pub classification: Classification,
}

/// Watch attribute pipeline
///
/// Holds only shared read-only collaborators; every call is an independent
/// run.
#[derive(Clone)]
pub struct WatchPipeline {
    catalog: Arc<dyn CatalogStore>,
    classifier: AiClassifier,
    require_known_series: bool,
}

impl WatchPipeline {
    pub fn new(catalog: Arc<dyn CatalogStore>, classifier: AiClassifier) -> Self {
        Self {
            catalog,
            classifier,
            require_known_series: false,
        }
    }

    /// Reject models whose series falls back to the generic code
    pub fn with_require_known_series(mut self, require: bool) -> Self {
        self.require_known_series = require;
        self
    }

    pub fn from_settings(settings: &Settings, catalog: Arc<dyn CatalogStore>) -> Self {
        Self::new(catalog, AiClassifier::from_settings(&settings.classifier))
            .with_require_known_series(settings.pipeline.require_known_series)
    }

    pub fn catalog(&self) -> &Arc<dyn CatalogStore> {
        &self.catalog
    }

    pub fn classifier(&self) -> &AiClassifier {
        &self.classifier
    }

    /// Parse raw text into a model code
    pub fn parse(&self, raw: &str) -> Result<ModelCode> {
        let code = parse_model_code(raw)?;
        if self.require_known_series && code.is_generic() {
            return Err(Error::SeriesCodeNotIdentified);
        }
        Ok(code)
    }

    /// Classify raw text. Never fails: text that does not parse is
    /// classified as-is.
    pub async fn classify_raw(&self, raw: &str, brand_hint: &str) -> Classification {
        let model = parse_model_code(raw)
            .map(|code| code.normalized)
            .unwrap_or_else(|_| raw.trim().to_uppercase());
        self.classifier.classify(&model, brand_hint).await
    }

    /// Gated attributes for raw text
    pub async fn infer_attributes(&self, raw: &str, brand_hint: &str) -> Attributes {
        self.classify_raw(raw, brand_hint).await.attributes
    }

    /// Parse, then classify
    pub async fn classify(&self, raw: &str, brand_hint: &str) -> Result<ClassifiedModel> {
        let model_code = self.parse(raw)?;
        let brand = resolve_brand(brand_hint, &model_code.normalized);
        let hint = if brand_hint.trim().is_empty() {
            brand.map(|b| b.name()).unwrap_or_default()
        } else {
            brand_hint
        };
        let classification = self.classifier.classify(&model_code.normalized, hint).await;

        Ok(ClassifiedModel {
            model_code,
            brand,
            classification,
        })
    }

    /// Build the full catalog record for raw text
    pub async fn build_record(&self, raw: &str) -> Result<CatalogRecord> {
        let code = self.parse(raw)?;
        let model = code.normalized.as_str();

        let base = match self.catalog.lookup(model) {
            Some(record) => record,
            None => {
                tracing::debug!(model = %model, "Model not in catalog, synthesizing record");
                CatalogRecord::synthesized(model, infer_brand(model))
            }
        };

        let brand_hint = if base.brand.trim().is_empty() {
            infer_brand(model).map(|b| b.name().to_string()).unwrap_or_default()
        } else {
            base.brand.clone()
        };

        let classification = self.classifier.classify(model, &brand_hint).await;
        tracing::debug!(
            model = %model,
            series = %code.series,
            source = ?classification.source,
            "Model classified"
        );

        Ok(merge_record(base, &classification.attributes, model))
    }
}
