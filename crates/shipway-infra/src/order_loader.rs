//! Order form loader (JSON)
//!
//! Accepts a flat JSON object keyed by form field name. Numbers and booleans
//! are taken as typed text so the validator sees what a user would have
//! entered; `null` counts as an empty field.

use serde_json::{Map, Value};
use shipway_domain::model::OrderForm;
use shipway_types::{Error, Result};
use std::path::Path;

/// Load an order form from a JSON file
pub fn load_order_form(path: &Path) -> Result<OrderForm> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    parse_order_form(&content)
}

/// Parse an order form from JSON text
pub fn parse_order_form(content: &str) -> Result<OrderForm> {
    let value: Value = serde_json::from_str(content)?;
    let object = value
        .as_object()
        .ok_or_else(|| Error::InvalidOrder("expected a JSON object of form fields".to_string()))?;

    let fields: Map<String, Value> = object
        .iter()
        .map(|(key, v)| (key.clone(), Value::String(as_text(v))))
        .collect();

    Ok(serde_json::from_value(Value::Object(fields))?)
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
