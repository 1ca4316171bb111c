//! Result type for extraction calls

use serde::Serialize;
use serde_json::Value;

/// Outcome of one extraction call
///
/// `latency_ms` is the unrounded wall-clock round trip; presentation
/// rounding is the caller's concern.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// Validated value conforming to the requested schema
    pub data: Value,

    /// PascalCase name of the schema that was extracted ("ContactInfo")
    pub schema_name: String,

    /// Model identifier that served the request
    pub model: String,

    /// Wall-clock latency of the provider round trip, in milliseconds
    pub latency_ms: f64,
}
