use crate::enums::TransactionKind;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The payload of one remote query: payload section key -> array of field maps.
pub type RawPayload = Map<String, Value>;

/// One transaction record exactly as the remote source returned it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// The field rendered as text; numbers are stringified, empty strings,
    /// `null` and missing fields are `None`.
    pub fn text(&self, name: &str) -> Option<String> {
        match self.0.get(name)? {
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Truthiness of a flag-like field (`true`, `"Y"`, `"1"`, non-zero numbers).
    pub fn flag(&self, name: &str) -> bool {
        match self.0.get(name) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            Some(Value::String(s)) => matches!(s.trim(), "Y" | "y" | "1" | "true" | "TRUE"),
            _ => false,
        }
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// A raw record placed in a named list, with its stable positional key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorizedItem {
    key: String,
    kind: TransactionKind,
    record: RawRecord,
}

impl CategorizedItem {
    pub fn new(key: String, kind: TransactionKind, record: RawRecord) -> Self {
        Self { key, kind, record }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn record(&self) -> &RawRecord {
        &self.record
    }
}

/// Number of decimal digits needed to print `len`, never less than one.
pub fn index_width(len: usize) -> usize {
    len.to_string().len()
}

/// Builds `"{list_name}_{index}"` with the index zero-padded to `width` digits.
pub fn item_key(list_name: &str, index: usize, width: usize) -> String {
    format!("{}_{:0width$}", list_name, index, width = width)
}
