//! Evaluation context
//!
//! The context is handed to permission and bypass checkers untouched. It
//! usually carries the subject being checked (a user) and the object being
//! accessed (a document).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Context passed to checkers during evaluation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvaluationContext {
    value: Value,
}

impl EvaluationContext {
    /// Wrap an arbitrary JSON value
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    /// Context with no data (`null`)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Set a top-level entry, turning the context into an object if needed
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        if !self.value.is_object() {
            self.value = Value::Object(Map::new());
        }
        if let Value::Object(map) = &mut self.value {
            map.insert(key.into(), value.into());
        }
        self
    }

    /// Top-level entry by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.value.get(key)
    }

    /// Underlying value
    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl From<Value> for EvaluationContext {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}
