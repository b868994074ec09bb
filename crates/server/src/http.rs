//! HTTP Endpoints
//!
//! REST API for the watch catalog classifier.

use std::time::Duration;

use axum::{
    extract::{Json, State},
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use watch_catalog_classifier::ClassificationSource;
use watch_catalog_core::{Attributes, CatalogRecord, CatalogStore};

use crate::state::AppState;
use crate::ServerError;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let config = state.config.read();
    let cors_layer = build_cors_layer(&config.server.cors_origins, config.server.cors_enabled);
    let timeout = Duration::from_secs(config.server.timeout_seconds);
    drop(config);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/search-single", post(search_single))
        .route("/api/classify", post(classify))
        .route("/api/batch", post(batch))
        .route("/admin/reload-catalog", post(reload_catalog))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(timeout))
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - If cors_enabled is false, returns a permissive layer
/// - If cors_origins is empty or all invalid, defaults to localhost:3000
/// - Otherwise, uses the configured origins
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins");
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::info!("No valid CORS origins configured, defaulting to localhost:3000");
        return CorsLayer::new()
            .allow_origin(HeaderValue::from_static("http://localhost:3000"))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

fn required_model(value: Option<String>) -> Result<String, ServerError> {
    value
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ServerError::InvalidRequest("model_number is required".to_string()))
}

/// Health check
///
/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "catalog_records": state.catalog.len(),
        "ai_enabled": state.pipeline.classifier().has_backend(),
    }))
}

#[derive(Debug, Deserialize)]
struct SearchSingleRequest {
    #[serde(default)]
    model_number: Option<String>,
}

#[derive(Debug, Serialize)]
struct SearchSingleResponse {
    success: bool,
    model_number: String,
    result: CatalogRecord,
    collections: Vec<String>,
}

/// Build the storefront record for one model
///
/// POST /api/search-single
async fn search_single(
    State(state): State<AppState>,
    Json(request): Json<SearchSingleRequest>,
) -> Result<Json<SearchSingleResponse>, ServerError> {
    let model_number = required_model(request.model_number)?;
    let result = state.pipeline.build_record(&model_number).await?;
    let collections = result.collections();

    Ok(Json(SearchSingleResponse {
        success: true,
        model_number,
        result,
        collections,
    }))
}

#[derive(Debug, Deserialize)]
struct ClassifyRequest {
    #[serde(default)]
    model_number: Option<String>,
    #[serde(default)]
    brand: Option<String>,
}

#[derive(Debug, Serialize)]
struct ClassifyResponse {
    model_number: String,
    series: String,
    brand: Option<String>,
    source: ClassificationSource,
    attributes: Attributes,
}

/// Classify one model without building a record
///
/// POST /api/classify
async fn classify(
    State(state): State<AppState>,
    Json(request): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>, ServerError> {
    let model_number = required_model(request.model_number)?;
    let hint = request.brand.unwrap_or_default();
    let out = state.pipeline.classify(&model_number, &hint).await?;

    Ok(Json(ClassifyResponse {
        model_number: out.model_code.normalized,
        series: out.model_code.series,
        brand: out.brand.map(|b| b.name().to_string()),
        source: out.classification.source,
        attributes: out.classification.attributes,
    }))
}

#[derive(Debug, Deserialize)]
struct BatchRequest {
    #[serde(default)]
    model_numbers: Vec<String>,
}

#[derive(Debug, Serialize)]
struct BatchError {
    model_number: String,
    error: String,
}

#[derive(Debug, Serialize)]
struct BatchResponse {
    results: Vec<CatalogRecord>,
    errors: Vec<BatchError>,
}

/// Build records for several models; per-model failures are reported, not fatal
///
/// POST /api/batch
async fn batch(
    State(state): State<AppState>,
    Json(request): Json<BatchRequest>,
) -> Result<Json<BatchResponse>, ServerError> {
    let models: Vec<String> = request
        .model_numbers
        .into_iter()
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .collect();

    if models.is_empty() {
        return Err(ServerError::InvalidRequest("model_numbers is required".to_string()));
    }
    let max = state.get_config().pipeline.max_batch_size;
    if models.len() > max {
        return Err(ServerError::InvalidRequest(format!(
            "at most {} model numbers per batch",
            max
        )));
    }

    let pipeline = state.pipeline.clone();
    let outcomes = futures::future::join_all(models.iter().map(|m| pipeline.build_record(m))).await;

    let mut response = BatchResponse {
        results: Vec::with_capacity(models.len()),
        errors: Vec::new(),
    };
    for (model_number, outcome) in models.into_iter().zip(outcomes) {
        match outcome {
            Ok(record) => response.results.push(record),
            Err(e) => response.errors.push(BatchError {
                model_number,
                error: e.code().to_string(),
            }),
        }
    }

    tracing::info!(
        ok = response.results.len(),
        failed = response.errors.len(),
        "Batch processed"
    );
    Ok(Json(response))
}

/// Catalog reload endpoint
///
/// POST /admin/reload-catalog
async fn reload_catalog(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let records = state.reload_catalog()?;
    tracing::info!(records, "Catalog reloaded");
    Ok(Json(serde_json::json!({
        "status": "success",
        "records": records
    })))
}
