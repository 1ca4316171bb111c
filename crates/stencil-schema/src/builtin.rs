//! Built-in extraction schemas

use crate::definition::{FieldDef, FieldType, Format, Rule, SchemaDefinition};
use once_cell::sync::Lazy;
use serde_json::json;

/// Contact information extracted from free text
pub static CONTACT_INFO: Lazy<SchemaDefinition> = Lazy::new(|| {
    SchemaDefinition::new(
        "ContactInfo",
        vec![
            FieldDef::new("name", FieldType::String, "Full name of the person"),
            FieldDef::new("email", FieldType::String, "Email address")
                .optional()
                .with_rule(Rule::Format(Format::Email)),
            FieldDef::new("phone", FieldType::String, "Phone number").optional(),
            FieldDef::new("company", FieldType::String, "Company or organization name")
                .optional(),
        ],
    )
});

/// Single line item within an invoice
pub static INVOICE_ITEM: Lazy<SchemaDefinition> = Lazy::new(|| {
    SchemaDefinition::new(
        "InvoiceItem",
        vec![
            FieldDef::new("description", FieldType::String, "Item description"),
            FieldDef::new("quantity", FieldType::Integer, "Quantity of items")
                .with_rule(Rule::MinValue(1.0)),
            FieldDef::new("unit_price", FieldType::Float, "Price per unit")
                .with_rule(Rule::MinValue(0.0)),
        ],
    )
});

/// Invoice data including header fields and line items
pub static INVOICE: Lazy<SchemaDefinition> = Lazy::new(|| {
    SchemaDefinition::new(
        "Invoice",
        vec![
            FieldDef::new("invoice_number", FieldType::String, "Invoice number or ID"),
            FieldDef::new("date", FieldType::String, "Invoice date (YYYY-MM-DD)"),
            FieldDef::new("total", FieldType::Float, "Total amount")
                .with_rule(Rule::MinValue(0.0)),
            FieldDef::new("currency", FieldType::String, "Currency code")
                .with_default(json!("USD")),
            FieldDef::new("vendor", FieldType::String, "Vendor or seller name").optional(),
            FieldDef::new(
                "items",
                FieldType::List(Lazy::force(&INVOICE_ITEM)),
                "Line items",
            )
            .with_default(json!([])),
        ],
    )
});
