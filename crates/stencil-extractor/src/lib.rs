//! Stencil Extractor
//!
//! Turns free-form text into a schema-conforming JSON value through one
//! LLM call, and reports how long the round trip took.
//!
//! The [`Extractor`] owns a [`ChatProvider`](stencil_llm::ChatProvider)
//! and a default model identifier, both fixed at construction; it holds
//! no other state and is safe to share across concurrent requests.

#![warn(missing_docs)]

mod error;
mod extractor;
mod types;

pub use error::ExtractError;
pub use extractor::{Extractor, DEFAULT_MODEL};
pub use types::ExtractionResult;
