//! Schema registry: closed set of shipped schemas
//!
//! The set of extraction targets is a tagged enumeration rather than an
//! open mapping of strings to types. [`SchemaKind`] enumerates every
//! shipped schema; the registry resolves short string keys to variants
//! and renders the discovery listing.

use crate::builtin;
use crate::definition::SchemaDefinition;
use once_cell::sync::Lazy;
use serde_json::{Map, Value};
use thiserror::Error;

/// Registry error
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Lookup key did not match any registered schema
    #[error("schema '{key}' not found. Available: {valid:?}")]
    UnknownSchema {
        /// The key that failed to resolve
        key: String,
        /// Every key the registry accepts
        valid: Vec<&'static str>,
    },
}

/// Every schema this service can extract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    /// Contact details of a person
    Contact,
    /// Invoice header and line items
    Invoice,
}

impl SchemaKind {
    /// All variants, in listing order
    pub const ALL: [SchemaKind; 2] = [SchemaKind::Contact, SchemaKind::Invoice];

    /// Short lookup key used in URLs ("contact", "invoice")
    pub fn key(&self) -> &'static str {
        match self {
            SchemaKind::Contact => "contact",
            SchemaKind::Invoice => "invoice",
        }
    }

    /// The field-table definition backing this variant
    pub fn definition(&self) -> &'static SchemaDefinition {
        match self {
            SchemaKind::Contact => Lazy::force(&builtin::CONTACT_INFO),
            SchemaKind::Invoice => Lazy::force(&builtin::INVOICE),
        }
    }
}

/// Read-only mapping from string keys to schema variants
///
/// Keys are unique and matched case-sensitively. The set is fixed at
/// compile time; there is no runtime registration.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry;

impl SchemaRegistry {
    /// Create the registry
    pub fn new() -> Self {
        Self
    }

    /// Resolve a key to a schema variant
    ///
    /// An unknown key is a normal condition, not a fatal error; the
    /// returned error carries the full valid-key list so callers can
    /// surface it.
    pub fn lookup(&self, key: &str) -> Result<SchemaKind, RegistryError> {
        SchemaKind::ALL
            .into_iter()
            .find(|kind| kind.key() == key)
            .ok_or_else(|| RegistryError::UnknownSchema {
                key: key.to_string(),
                valid: self.valid_keys(),
            })
    }

    /// Every key the registry accepts, in listing order
    pub fn valid_keys(&self) -> Vec<&'static str> {
        SchemaKind::ALL.iter().map(|kind| kind.key()).collect()
    }

    /// Render every schema as a key → JSON-Schema document mapping
    pub fn describe_all(&self) -> Value {
        let mut listing = Map::new();
        for kind in SchemaKind::ALL {
            listing.insert(kind.key().to_string(), kind.definition().to_json_schema());
        }
        Value::Object(listing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_keys() {
        let registry = SchemaRegistry::new();
        assert_eq!(registry.lookup("contact").unwrap(), SchemaKind::Contact);
        assert_eq!(registry.lookup("invoice").unwrap(), SchemaKind::Invoice);
    }

    #[test]
    fn test_lookup_unknown_key() {
        let registry = SchemaRegistry::new();
        let err = registry.lookup("receipt").unwrap_err();
        let RegistryError::UnknownSchema { key, valid } = err;
        assert_eq!(key, "receipt");
        assert_eq!(valid, vec!["contact", "invoice"]);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let registry = SchemaRegistry::new();
        assert!(registry.lookup("Contact").is_err());
        assert!(registry.lookup("CONTACT").is_err());
    }

    #[test]
    fn test_unknown_schema_message_lists_valid_keys() {
        let registry = SchemaRegistry::new();
        let message = registry.lookup("receipt").unwrap_err().to_string();
        assert!(message.contains("receipt"));
        assert!(message.contains("contact"));
        assert!(message.contains("invoice"));
    }

    #[test]
    fn test_definition_names_are_pascal_case() {
        assert_eq!(SchemaKind::Contact.definition().name, "ContactInfo");
        assert_eq!(SchemaKind::Invoice.definition().name, "Invoice");
    }

    #[test]
    fn test_describe_all_covers_every_key() {
        let registry = SchemaRegistry::new();
        let listing = registry.describe_all();
        for key in registry.valid_keys() {
            let doc = &listing[key];
            assert!(doc["properties"].is_object(), "no properties for '{}'", key);
        }
    }
}
