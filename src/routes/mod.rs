// Route exports
pub mod candidates;
pub mod generate;

use actix_web::{error, http::StatusCode, web, HttpResponse};
use std::sync::Arc;

use crate::config::{SearchSettings, Settings};
use crate::services::{GeneratorError, JobGenerator, ProviderClient, ProviderError};

/// Application state shared across all handlers
///
/// Either collaborator may be absent; handlers then serve mock data.
#[derive(Clone)]
pub struct AppState {
    pub provider: Option<Arc<ProviderClient>>,
    pub generator: Option<Arc<JobGenerator>>,
    pub search: SearchSettings,
}

/// Failure while building the collaborators from configuration
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("provider client: {0}")]
    Provider(#[from] ProviderError),
    #[error("generator client: {0}")]
    Generator(#[from] GeneratorError),
}

impl AppState {
    pub fn from_settings(settings: &Settings) -> Result<Self, StateError> {
        let provider = ProviderClient::from_settings(&settings.provider, &settings.rate_limit)?;
        let generator = JobGenerator::from_settings(&settings.generator)?;

        Ok(Self {
            provider: provider.map(Arc::new),
            generator: generator.map(Arc::new),
            search: settings.search.clone(),
        })
    }

    /// State with no external collaborators; every endpoint serves mock data
    pub fn offline(search: SearchSettings) -> Self {
        Self {
            provider: None,
            generator: None,
            search,
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(candidates::configure)
            .configure(generate::configure),
    );
}

/// JSON error body for rejected payloads
#[derive(Debug, serde::Serialize)]
pub struct PayloadError {
    pub success: bool,
    pub error: String,
    pub details: String,
}

impl std::fmt::Display for PayloadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.details)
    }
}

impl std::error::Error for PayloadError {}

impl error::ResponseError for PayloadError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    PayloadError {
        success: false,
        error: "Invalid JSON".to_string(),
        details: err.to_string(),
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("Query payload error on {}: {}", req.path(), err);
    PayloadError {
        success: false,
        error: "Invalid query".to_string(),
        details: err.to_string(),
    }
    .into()
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(handle_json_payload_error)
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(handle_query_payload_error)
}
