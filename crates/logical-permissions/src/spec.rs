//! Raw permission specifications
//!
//! A specification is a JSON value. Booleans and strings are leaves; objects
//! and arrays are mappings. Array elements and object keys made only of ASCII
//! digits are positional; any other object key is a name that is matched
//! case-insensitively against the reserved tokens below.

use serde_json::{Map, Value};
use std::fmt;

/// Raw, nested permission specification
pub type PermissionSpec = Value;

/// Reserved key that introduces the bypass veto tree
pub const NO_BYPASS: &str = "NO_BYPASS";

/// Boolean literal tokens
pub const TRUE: &str = "TRUE";
pub const FALSE: &str = "FALSE";

/// Key of one mapping entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SpecKey {
    /// Positional key
    Index(usize),
    /// Named key, kept verbatim
    Name(String),
}

impl SpecKey {
    /// Classify an object key
    pub fn parse(key: &str) -> Self {
        if !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(index) = key.parse() {
                return SpecKey::Index(index);
            }
        }
        SpecKey::Name(key.to_string())
    }

    /// Named key, if any
    pub fn as_name(&self) -> Option<&str> {
        match self {
            SpecKey::Index(_) => None,
            SpecKey::Name(name) => Some(name),
        }
    }

    /// Whether this is a named key equal to `token`, ignoring case
    pub fn is_token(&self, token: &str) -> bool {
        self.as_name()
            .map(|name| name.eq_ignore_ascii_case(token))
            .unwrap_or(false)
    }
}

impl fmt::Display for SpecKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecKey::Index(index) => write!(f, "{}", index),
            SpecKey::Name(name) => f.write_str(name),
        }
    }
}

/// Entries of a mapping in declaration order; `None` for leaves
pub fn entries(spec: &PermissionSpec) -> Option<Vec<(SpecKey, &PermissionSpec)>> {
    match spec {
        Value::Array(items) => Some(
            items
                .iter()
                .enumerate()
                .map(|(index, value)| (SpecKey::Index(index), value))
                .collect(),
        ),
        Value::Object(map) => Some(
            map.iter()
                .map(|(key, value)| (SpecKey::parse(key), value))
                .collect(),
        ),
        _ => None,
    }
}

/// Whether the specification is a mapping without entries
pub fn is_empty_mapping(spec: &PermissionSpec) -> bool {
    match spec {
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Whether `token` is a boolean literal, ignoring case
pub fn is_boolean_token(token: &str) -> bool {
    token.eq_ignore_ascii_case(TRUE) || token.eq_ignore_ascii_case(FALSE)
}

/// Single-entry mapping `{key: value}`
pub fn single_entry(key: &SpecKey, value: PermissionSpec) -> PermissionSpec {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}

/// Compact JSON rendering used in error messages and logs
pub fn render(spec: &PermissionSpec) -> String {
    spec.to_string()
}
