//! Watch Catalog Server
//!
//! HTTP endpoints for single-model record building, attribute
//! classification and batch runs.

pub mod http;
pub mod state;

pub use http::create_router;
pub use state::AppState;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Input could not be turned into a model code
    #[error("{0}")]
    Model(#[from] watch_catalog_core::Error),

    #[error("Catalog error: {0}")]
    Catalog(#[from] watch_catalog_classifier::CatalogError),
}

impl ServerError {
    /// Value reported in the `error` field of the response body
    fn public_message(&self) -> String {
        match self {
            ServerError::InvalidRequest(msg) => msg.clone(),
            ServerError::Model(e) => e.code().to_string(),
            other => other.to_string(),
        }
    }
}

impl From<&ServerError> for StatusCode {
    fn from(err: &ServerError) -> Self {
        match err {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Model(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = StatusCode::from(&self);
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (status, Json(serde_json::json!({ "error": self.public_message() }))).into_response()
    }
}
