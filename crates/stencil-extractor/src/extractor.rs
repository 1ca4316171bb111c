//! Core Extractor implementation

use crate::error::ExtractError;
use crate::types::ExtractionResult;
use std::sync::Arc;
use std::time::Instant;
use stencil_llm::{ChatProvider, ChatRequest};
use stencil_schema::{validate, SchemaKind};
use tracing::{debug, info};

/// Model used when neither the request nor the config names one
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// System instruction sent with every extraction request
const SYSTEM_INSTRUCTION: &str = "Extract structured data from the following text. \
    Only include information explicitly stated in the text.";

/// Converts unstructured text into schema-conforming values
pub struct Extractor {
    provider: Arc<dyn ChatProvider>,
    default_model: String,
}

impl Extractor {
    /// Create an Extractor backed by the given provider
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self {
            provider,
            default_model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Override the process-wide default model
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Extract a value conforming to `schema` from `text`
    ///
    /// Issues exactly one provider call: the fixed system instruction
    /// plus the caller's text, constrained to the schema's JSON-Schema
    /// document. The provider's value is validated against the field
    /// table before it is returned; a non-conforming value is an error,
    /// never a partial success.
    ///
    /// Callers are expected to have rejected empty text already; this
    /// method does not re-validate the envelope.
    pub async fn extract(
        &self,
        text: &str,
        schema: SchemaKind,
        model: Option<&str>,
    ) -> Result<ExtractionResult, ExtractError> {
        let model = model.unwrap_or(&self.default_model).to_string();
        let definition = schema.definition();

        debug!(
            schema = definition.name,
            model = %model,
            text_len = text.len(),
            "issuing extraction request"
        );

        let request = ChatRequest::new(
            &model,
            SYSTEM_INSTRUCTION,
            text,
            definition.name,
            definition.to_json_schema(),
        );

        let start = Instant::now();
        let raw = self.provider.complete(&request).await?;
        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

        let data = validate(definition, &raw)?;

        info!(
            schema = definition.name,
            model = %model,
            latency_ms,
            "extraction complete"
        );

        Ok(ExtractionResult {
            data,
            schema_name: definition.name.to_string(),
            model,
            latency_ms,
        })
    }
}
