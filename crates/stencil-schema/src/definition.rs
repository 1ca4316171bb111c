//! Field tables and JSON-Schema rendering for output shapes

use serde_json::{json, Map, Value};

/// JSON type of a single schema field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// Integer number
    Integer,
    /// Floating-point number
    Float,
    /// Boolean
    Boolean,
    /// Ordered list of sub-records described by a nested definition
    List(&'static SchemaDefinition),
}

impl FieldType {
    /// JSON-Schema `type` keyword for this field type
    pub fn json_type(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Float => "number",
            FieldType::Boolean => "boolean",
            FieldType::List(_) => "array",
        }
    }
}

/// Declarative validation rule attached to a field
///
/// Rules are interpreted by the generic validator; a definition never
/// carries validation code of its own.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// Numeric value must be >= the bound
    MinValue(f64),
    /// String must contain at least this many characters
    MinLength(usize),
    /// String must match a well-known format
    Format(Format),
}

/// Well-known string formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// RFC-5322-style email address (pragmatic check, not full grammar)
    Email,
}

impl Format {
    /// JSON-Schema `format` keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Email => "email",
        }
    }
}

/// Definition of a single named field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    /// Field name as it appears in the JSON object
    pub name: &'static str,

    /// JSON type of the field
    pub ty: FieldType,

    /// Whether the field must be present in extracted output
    pub required: bool,

    /// Value substituted when an optional field is absent
    pub default: Option<Value>,

    /// Validation rules applied to present values
    pub rules: Vec<Rule>,

    /// Human-readable description (surfaces in the JSON-Schema document
    /// handed to the LLM, so it doubles as extraction guidance)
    pub description: &'static str,
}

impl FieldDef {
    /// Create a required field with no rules
    pub fn new(name: &'static str, ty: FieldType, description: &'static str) -> Self {
        Self {
            name,
            ty,
            required: true,
            default: None,
            rules: Vec::new(),
            description,
        }
    }

    /// Mark the field optional
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Set the default used when the field is absent (implies optional)
    pub fn with_default(mut self, default: Value) -> Self {
        self.required = false;
        self.default = Some(default);
        self
    }

    /// Attach a validation rule
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }
}

/// A named, immutable output-shape definition
///
/// Built once at process start; never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDefinition {
    /// PascalCase type name (e.g. "ContactInfo")
    pub name: &'static str,

    /// Ordered field table
    pub fields: Vec<FieldDef>,
}

impl SchemaDefinition {
    /// Create a definition from a field table
    pub fn new(name: &'static str, fields: Vec<FieldDef>) -> Self {
        Self { name, fields }
    }

    /// Render the definition as a JSON-Schema document
    ///
    /// Produces standard `type` / `properties` / `required` keywords plus
    /// `minimum`, `minLength`, `format`, and `default` where rules or
    /// defaults are declared. The same document is served by `/schemas`
    /// and handed to the LLM provider for constrained decoding.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for field in &self.fields {
            let mut prop = Map::new();
            match &field.ty {
                FieldType::List(item_def) => {
                    prop.insert("type".to_string(), json!("array"));
                    prop.insert("items".to_string(), item_def.to_json_schema());
                }
                other => {
                    prop.insert("type".to_string(), json!(other.json_type()));
                }
            }
            prop.insert("description".to_string(), json!(field.description));

            for rule in &field.rules {
                match rule {
                    Rule::MinValue(min) => {
                        prop.insert("minimum".to_string(), json!(min));
                    }
                    Rule::MinLength(len) => {
                        prop.insert("minLength".to_string(), json!(len));
                    }
                    Rule::Format(format) => {
                        prop.insert("format".to_string(), json!(format.as_str()));
                    }
                }
            }

            if let Some(default) = &field.default {
                prop.insert("default".to_string(), default.clone());
            }

            if field.required {
                required.push(json!(field.name));
            }

            properties.insert(field.name.to_string(), Value::Object(prop));
        }

        json!({
            "title": self.name,
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_definition() -> SchemaDefinition {
        SchemaDefinition::new(
            "Sample",
            vec![
                FieldDef::new("label", FieldType::String, "A label")
                    .with_rule(Rule::MinLength(1)),
                FieldDef::new("count", FieldType::Integer, "A count")
                    .optional()
                    .with_rule(Rule::MinValue(0.0)),
            ],
        )
    }

    #[test]
    fn test_json_schema_has_properties() {
        let schema = sample_definition().to_json_schema();
        assert_eq!(schema["title"], "Sample");
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["label"]["type"], "string");
        assert_eq!(schema["properties"]["count"]["type"], "integer");
    }

    #[test]
    fn test_json_schema_required_lists_only_required_fields() {
        let schema = sample_definition().to_json_schema();
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 1);
        assert_eq!(required[0], "label");
    }

    #[test]
    fn test_json_schema_renders_rules() {
        let schema = sample_definition().to_json_schema();
        assert_eq!(schema["properties"]["label"]["minLength"], 1);
        assert_eq!(schema["properties"]["count"]["minimum"], 0.0);
    }

    #[test]
    fn test_with_default_implies_optional() {
        let field = FieldDef::new("currency", FieldType::String, "Currency code")
            .with_default(json!("USD"));
        assert!(!field.required);
        assert_eq!(field.default, Some(json!("USD")));
    }

    #[test]
    fn test_json_type_mapping() {
        assert_eq!(FieldType::String.json_type(), "string");
        assert_eq!(FieldType::Integer.json_type(), "integer");
        assert_eq!(FieldType::Float.json_type(), "number");
        assert_eq!(FieldType::Boolean.json_type(), "boolean");
    }
}
