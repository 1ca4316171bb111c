//! HTTP request handlers for the extraction service.
//!
//! Implements health, schema discovery, and extraction endpoints using
//! axum. Per-request processing is a fixed pipeline: envelope validation,
//! registry lookup, lazy extractor initialization, extraction, and wire
//! serialization, in that order.

use crate::config::{ServerConfig, API_KEY_ENV};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use stencil_extractor::{ExtractError, Extractor};
use stencil_llm::OpenAiProvider;
use stencil_schema::{RegistryError, SchemaRegistry};
use tokio::sync::OnceCell;
use tracing::warn;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Registry of extraction schemas
    pub registry: Arc<SchemaRegistry>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Extractor, constructed once on first use
    ///
    /// The cell guarantees exactly one construction for the process
    /// lifetime even when the first requests race.
    extractor: Arc<OnceCell<Arc<Extractor>>>,
}

impl AppState {
    /// State for a production server; the extractor is built lazily from
    /// the process environment on first extraction request
    pub fn new(config: ServerConfig) -> Self {
        Self {
            registry: Arc::new(SchemaRegistry::new()),
            config: Arc::new(config),
            extractor: Arc::new(OnceCell::new()),
        }
    }

    /// State with a pre-built extractor (tests substitute a mock-backed
    /// one; no environment access happens on this path)
    pub fn with_extractor(config: ServerConfig, extractor: Extractor) -> Self {
        Self {
            registry: Arc::new(SchemaRegistry::new()),
            config: Arc::new(config),
            extractor: Arc::new(OnceCell::new_with(Some(Arc::new(extractor)))),
        }
    }

    /// Get the shared extractor, constructing it on first call
    ///
    /// Construction reads the provider credential from the environment
    /// and fails fast when it is absent; nothing is cached on failure, so
    /// a later request can succeed once the credential is configured.
    async fn extractor(&self) -> Result<&Arc<Extractor>, AppError> {
        self.extractor
            .get_or_try_init(|| async {
                let api_key =
                    std::env::var(API_KEY_ENV).ok().filter(|key| !key.is_empty());
                let Some(api_key) = api_key else {
                    return Err(AppError::MissingCredential);
                };

                let mut provider = OpenAiProvider::new(api_key);
                if let Some(base_url) = &self.config.api_base_url {
                    provider = provider.with_base_url(base_url);
                }

                Ok(Arc::new(
                    Extractor::new(Arc::new(provider))
                        .with_default_model(&self.config.default_model),
                ))
            })
            .await
    }
}

/// Extraction request envelope
#[derive(Debug, Deserialize)]
pub struct ExtractionRequest {
    /// Text to extract data from
    pub text: String,

    /// Optional model override
    #[serde(default)]
    pub model: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall service status
    pub status: String,
    /// Crate version
    pub version: String,
}

/// Successful extraction response
#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractResponse {
    /// Validated value conforming to the requested schema
    pub data: Value,
    /// PascalCase schema type name
    pub schema_name: String,
    /// Model that served the request
    pub model: String,
    /// Round-trip latency, rounded to one decimal place
    pub latency_ms: f64,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Request text was empty or whitespace-only
    EmptyText,
    /// Requested schema key is not registered
    UnknownSchema(RegistryError),
    /// Provider credential is not configured in the environment
    MissingCredential,
    /// The extraction call failed
    Extraction(ExtractError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::EmptyText => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "text cannot be empty or whitespace only".to_string(),
            ),
            AppError::UnknownSchema(e) => (StatusCode::NOT_FOUND, e.to_string()),
            AppError::MissingCredential => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("{} not configured", API_KEY_ENV),
            ),
            AppError::Extraction(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<RegistryError> for AppError {
    fn from(e: RegistryError) -> Self {
        AppError::UnknownSchema(e)
    }
}

impl From<ExtractError> for AppError {
    fn from(e: ExtractError) -> Self {
        AppError::Extraction(e)
    }
}

/// Round to one decimal place for wire presentation
///
/// Half-way values round away from zero (`f64::round` semantics); the
/// unrounded figure never leaves the extractor.
fn round_latency(latency_ms: f64) -> f64 {
    (latency_ms * 10.0).round() / 10.0
}

/// GET /health - Liveness probe
///
/// Always healthy while the process serves requests; reports the crate
/// version regardless of configuration state.
async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /schemas - List every registered schema as a JSON-Schema document
async fn list_schemas(State(state): State<AppState>) -> Json<Value> {
    Json(state.registry.describe_all())
}

/// POST /extract/{schema_name} - Extract structured data from text
async fn extract(
    State(state): State<AppState>,
    Path(schema_name): Path<String>,
    Json(request): Json<ExtractionRequest>,
) -> Result<Json<ExtractResponse>, AppError> {
    // 1. Envelope: reject blank text before any lookup or network call
    if request.text.trim().is_empty() {
        return Err(AppError::EmptyText);
    }

    // 2. Resolve the schema key; unknown keys never reach the extractor
    let schema = state.registry.lookup(&schema_name)?;

    // 3. Extractor is constructed on first use and shared afterwards
    let extractor = state.extractor().await?;

    // 4. One provider call
    let result = extractor
        .extract(&request.text, schema, request.model.as_deref())
        .await
        .map_err(|e| {
            warn!(schema = schema_name.as_str(), "extraction failed: {}", e);
            AppError::from(e)
        })?;

    // 5. Serialize; latency is rounded here and only here
    Ok(Json(ExtractResponse {
        data: result.data,
        schema_name: result.schema_name,
        model: result.model,
        latency_ms: round_latency(result.latency_ms),
    }))
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/schemas", get(list_schemas))
        .route("/extract/:schema_name", post(extract))
        .with_state(state)
}
