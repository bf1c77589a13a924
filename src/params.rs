//! Instrument parameter dictionaries.
//!
//! File readers hand back their acquisition parameters as a loosely typed
//! JSON-like tree: Bruker readers nest one block per parameter file
//! (`acqus`, `acqu2s`, ...), NMRPipe readers produce a flat map of `FD*`
//! header keys. [`ParameterDictionary`] wraps that tree with typed lookups.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Acquisition parameters as returned by a file reader
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterDictionary(Map<String, Value>);

impl ParameterDictionary {
    /// Empty dictionary
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a JSON value; `None` unless it is an object
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Raw value of a top-level key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether a top-level key exists
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Set a top-level key, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Walk a path of nested object keys
    pub fn lookup(&self, path: &[&str]) -> Option<&Value> {
        let (head, rest) = path.split_first()?;
        let mut current = self.0.get(*head)?;
        for key in rest {
            current = current.as_object()?.get(*key)?;
        }
        Some(current)
    }

    /// Numeric value at a nested path. Numeric strings are accepted since some
    /// readers keep header values as text.
    pub fn f64_at(&self, path: &[&str]) -> Option<f64> {
        match self.lookup(path)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// String value at a nested path
    pub fn str_at(&self, path: &[&str]) -> Option<&str> {
        self.lookup(path)?.as_str()
    }

    /// Numeric array at a nested path
    pub fn f64_array_at(&self, path: &[&str]) -> Option<Vec<f64>> {
        self.lookup(path)?
            .as_array()?
            .iter()
            .map(Value::as_f64)
            .collect()
    }
}
