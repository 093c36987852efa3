/*
 * context.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Data values and the key/value context a view is rendered against.
//!
//! Keys are flat dot-path strings (`user.name`), not nested lookups: a loop
//! iteration over item maps binds `alias.subkey` entries directly into the
//! child context, and condition references resolve against the same flat
//! namespace.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A value bound to a context key.
///
/// Scalars (`Str`, `Num`, `Bool`) may be interpolated into the document;
/// collections (`List`, `Map`) may only be iterated by `@for`. `Map` is a
/// `BTreeMap` so iterating a mapping has a deterministic order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A string value.
    Str(String),

    /// A numeric value.
    Num(f64),

    /// A boolean value.
    Bool(bool),

    /// An ordered sequence of values.
    List(Vec<Value>),

    /// A mapping of sub-keys to values, iterated in key order.
    Map(BTreeMap<String, Value>),

    /// A null/missing value.
    Null,
}

impl Value {
    /// Whether this value may be interpolated into document text.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Value::Str(_) | Value::Num(_) | Value::Bool(_))
    }

    /// Check if this value is "truthy" for conditional evaluation.
    ///
    /// Truthiness rules:
    /// - Any non-empty string is truthy (even "false")
    /// - Any non-zero number is truthy
    /// - Any non-empty list or map is truthy
    /// - Everything else is falsy
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Str(s) => !s.is_empty(),
            Value::Num(n) => *n != 0.0,
            Value::Bool(b) => *b,
            Value::List(items) => !items.is_empty(),
            Value::Map(m) => !m.is_empty(),
            Value::Null => false,
        }
    }

    /// Render this value as a string for interpolation.
    ///
    /// - Str: returned as-is
    /// - Num: `Display` formatting (integral values print without a fraction)
    /// - Bool: "true" or "" (empty for false)
    /// - List/Map/Null: ""
    ///
    /// Collections never interpolate; callers gate on [`Value::is_scalar`]
    /// before substituting.
    pub fn render(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            Value::Num(n) => n.to_string(),
            Value::Bool(true) => "true".to_string(),
            Value::Bool(false) => String::new(),
            Value::List(_) | Value::Map(_) | Value::Null => String::new(),
        }
    }

    /// Numeric coercion for loose comparison.
    ///
    /// Numbers are themselves, booleans are 1/0, null is 0, and strings
    /// parse if they hold a number. Collections never coerce.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(*n),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Null => Some(0.0),
            Value::Str(s) => s.trim().parse().ok(),
            Value::List(_) | Value::Map(_) => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Num(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Num(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(m: BTreeMap<String, Value>) -> Self {
        Value::Map(m)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Num(n.as_f64().unwrap_or(0.0)),
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(m) => {
                Value::Map(m.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

/// Key/value bindings for a render.
///
/// Never mutated after construction of a given render step: a child render
/// gets a derived copy, e.g. with one loop item's sub-keys merged in.
#[derive(Debug, Clone, Default)]
pub struct DataContext {
    entries: HashMap<String, Value>,
}

impl DataContext {
    /// Create a new empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context from key/value pairs.
    pub fn with_entries(
        entries: impl IntoIterator<Item = (impl Into<String>, impl Into<Value>)>,
    ) -> Self {
        let mut ctx = Self::new();
        for (key, value) in entries {
            ctx.insert(key, value);
        }
        ctx
    }

    /// Build a context from the fields of a JSON object.
    ///
    /// Non-object values produce an empty context.
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(m) => Self {
                entries: m.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            },
            _ => Self::new(),
        }
    }

    /// Insert one binding, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Merge another context's bindings in; its entries win on conflict.
    pub fn merge(&mut self, other: DataContext) {
        self.entries.extend(other.entries);
    }

    /// Look up a binding.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Whether a binding exists for `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the context holds no bindings.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for DataContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::with_entries(iter)
    }
}
