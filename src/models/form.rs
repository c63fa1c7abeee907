//! Raw form inputs
//!
//! The values a disease form submitted, exactly as the browser sent them.
//! Forms mix strings and numbers freely, so lookups stringify on the way out.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw key/value inputs from a disease form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormInputs(Map<String, Value>);

impl FormInputs {
    pub fn new(values: Map<String, Value>) -> Self {
        Self(values)
    }

    /// Build from any JSON value; non-objects yield empty inputs
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    /// Value for `key` if the key was submitted at all (null counts as missing)
    pub fn present(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// Text for `key` if the value is non-empty and non-zero
    pub fn filled_text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
            Value::Bool(true) => Some("true".to_string()),
            _ => None,
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Render a raw form value the way it was typed
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
