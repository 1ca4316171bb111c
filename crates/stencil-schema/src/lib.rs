//! Stencil Schema Definitions
//!
//! Output-shape definitions for structured extraction.
//!
//! # Architecture
//!
//! A [`SchemaDefinition`] is a named table of [`FieldDef`] entries, each
//! carrying a JSON type, a required flag, an optional default, and a list
//! of validation rules. A single generic validator walks the table against
//! a `serde_json::Value`; there is no per-schema validation code.
//!
//! The set of schemas is closed: [`SchemaKind`] enumerates every shipped
//! definition and the [`SchemaRegistry`] maps short string keys to
//! variants.
//!
//! # Examples
//!
//! ```
//! use stencil_schema::SchemaRegistry;
//!
//! let registry = SchemaRegistry::new();
//! let kind = registry.lookup("contact").unwrap();
//! assert_eq!(kind.definition().name, "ContactInfo");
//! ```

#![warn(missing_docs)]

pub mod builtin;
pub mod definition;
pub mod registry;
pub mod validate;

pub use definition::{FieldDef, FieldType, Format, Rule, SchemaDefinition};
pub use registry::{RegistryError, SchemaKind, SchemaRegistry};
pub use validate::{validate, SchemaError};
