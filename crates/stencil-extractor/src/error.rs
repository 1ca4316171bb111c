//! Error types for the Extractor

use stencil_llm::LlmError;
use stencil_schema::SchemaError;
use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The LLM call failed (network, provider, or unparseable response)
    #[error("LLM provider error: {0}")]
    Provider(#[from] LlmError),

    /// The provider's value does not conform to the requested schema
    #[error("response does not conform to schema: {0}")]
    Schema(#[from] SchemaError),
}
