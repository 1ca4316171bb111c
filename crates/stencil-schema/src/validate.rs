//! Generic rule-table validator
//!
//! One validator interprets every [`SchemaDefinition`]; schemas carry
//! data, not code. Validation normalizes as it checks: defaults are
//! substituted for absent optional fields, undeclared fields are dropped,
//! and absent optionals without a default come back as explicit nulls.

use crate::definition::{FieldDef, FieldType, Format, Rule, SchemaDefinition};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;

/// Pragmatic email shape: non-empty local part, "@", domain with a dot.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Errors produced when a value does not conform to a definition
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Top-level value was not a JSON object
    #[error("expected a JSON object for schema '{0}'")]
    NotAnObject(String),

    /// A required field is absent or null
    #[error("missing required field '{field}'")]
    MissingField {
        /// Name of the absent field
        field: String,
    },

    /// A field holds a value of the wrong JSON type
    #[error("field '{field}' has wrong type (expected {expected})")]
    WrongType {
        /// Name of the offending field
        field: String,
        /// JSON type the definition declares
        expected: &'static str,
    },

    /// A field violates one of its validation rules
    #[error("field '{field}' {detail}")]
    RuleViolation {
        /// Name of the offending field
        field: String,
        /// Description of the violated rule
        detail: String,
    },
}

/// Validate `value` against `def`, returning the normalized object
///
/// The returned value contains exactly the declared fields: present
/// fields are checked against their type and rules, absent optionals are
/// filled from their default (or null), and undeclared fields are
/// discarded.
pub fn validate(def: &SchemaDefinition, value: &Value) -> Result<Value, SchemaError> {
    let object = value
        .as_object()
        .ok_or_else(|| SchemaError::NotAnObject(def.name.to_string()))?;

    let mut normalized = Map::new();

    for field in &def.fields {
        // LLM providers routinely emit explicit nulls for absent
        // optionals; treat null the same as missing.
        match object.get(field.name).filter(|v| !v.is_null()) {
            Some(present) => {
                let checked = validate_field(field, present)?;
                normalized.insert(field.name.to_string(), checked);
            }
            None => {
                if field.required {
                    return Err(SchemaError::MissingField {
                        field: field.name.to_string(),
                    });
                }
                let filled = field.default.clone().unwrap_or(Value::Null);
                normalized.insert(field.name.to_string(), filled);
            }
        }
    }

    Ok(Value::Object(normalized))
}

/// Check one present value against its field definition
fn validate_field(field: &FieldDef, value: &Value) -> Result<Value, SchemaError> {
    let wrong_type = || SchemaError::WrongType {
        field: field.name.to_string(),
        expected: field.ty.json_type(),
    };

    let checked = match &field.ty {
        FieldType::String => {
            let s = value.as_str().ok_or_else(wrong_type)?;
            apply_string_rules(field, s)?;
            value.clone()
        }
        FieldType::Integer => {
            let n = value.as_i64().ok_or_else(wrong_type)?;
            apply_numeric_rules(field, n as f64)?;
            value.clone()
        }
        FieldType::Float => {
            // Integers are acceptable where a float is declared
            let n = value.as_f64().ok_or_else(wrong_type)?;
            apply_numeric_rules(field, n)?;
            value.clone()
        }
        FieldType::Boolean => {
            if !value.is_boolean() {
                return Err(wrong_type());
            }
            value.clone()
        }
        FieldType::List(item_def) => {
            let items = value.as_array().ok_or_else(wrong_type)?;
            let mut normalized = Vec::with_capacity(items.len());
            for item in items {
                normalized.push(validate(item_def, item)?);
            }
            Value::Array(normalized)
        }
    };

    Ok(checked)
}

fn apply_string_rules(field: &FieldDef, s: &str) -> Result<(), SchemaError> {
    for rule in &field.rules {
        match rule {
            Rule::MinLength(min) => {
                if s.chars().count() < *min {
                    return Err(SchemaError::RuleViolation {
                        field: field.name.to_string(),
                        detail: format!("is shorter than {} characters", min),
                    });
                }
            }
            Rule::Format(Format::Email) => {
                if !EMAIL_RE.is_match(s) {
                    return Err(SchemaError::RuleViolation {
                        field: field.name.to_string(),
                        detail: format!("'{}' is not a valid email address", s),
                    });
                }
            }
            Rule::MinValue(_) => {}
        }
    }
    Ok(())
}

fn apply_numeric_rules(field: &FieldDef, n: f64) -> Result<(), SchemaError> {
    for rule in &field.rules {
        if let Rule::MinValue(min) = rule {
            if n < *min {
                return Err(SchemaError::RuleViolation {
                    field: field.name.to_string(),
                    detail: format!("must be >= {}, got {}", min, n),
                });
            }
        }
    }
    Ok(())
}
