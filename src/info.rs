//! Flattened attribute view of shares and companies.
//!
//! `info()` renders a record as a nested JSON object (the company under the
//! `company` key). [`flatten_info`] turns that into dotted-key columns suitable for
//! a table row, and [`nest_info`] reverses it. Arrays such as `shareholders` stay
//! single leaf values.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::company::Company;
use crate::core::BvbError;
use crate::shares::Share;

impl Share {
    /// Full attribute mapping, with the company nested under `company`.
    #[must_use]
    pub fn info(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }

    /// Rebuilds a share from its [`info`](Self::info) mapping.
    ///
    /// # Errors
    ///
    /// Returns `BvbError::Json` when the mapping lacks a field or holds a value of
    /// the wrong type.
    pub fn from_info(info: &Value) -> Result<Self, BvbError> {
        Ok(serde_json::from_value(info.clone())?)
    }
}

impl Company {
    /// Full attribute mapping.
    #[must_use]
    pub fn info(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }

    /// Rebuilds a company from its [`info`](Self::info) mapping, e.g. the `company`
    /// part of a re-nested share row.
    ///
    /// # Errors
    ///
    /// Returns `BvbError::Json` when the mapping lacks a field or holds a value of
    /// the wrong type.
    pub fn from_info(info: &Value) -> Result<Self, BvbError> {
        Ok(serde_json::from_value(info.clone())?)
    }
}

/// Flattens nested objects into `parent.child` keys. Non-object values (including
/// arrays and `null`) are leaves.
#[must_use]
pub fn flatten_info(info: &Value) -> BTreeMap<String, Value> {
    let mut out = BTreeMap::new();
    match info {
        Value::Object(map) => flatten_into(&mut out, None, map),
        other => {
            out.insert(String::new(), other.clone());
        }
    }
    out
}

fn flatten_into(out: &mut BTreeMap<String, Value>, prefix: Option<&str>, map: &Map<String, Value>) {
    for (key, value) in map {
        let path = match prefix {
            Some(p) => format!("{p}.{key}"),
            None => key.clone(),
        };
        match value {
            Value::Object(inner) if !inner.is_empty() => flatten_into(out, Some(&path), inner),
            other => {
                out.insert(path, other.clone());
            }
        }
    }
}

/// Rebuilds the nested object from dotted keys.
#[must_use]
pub fn nest_info(flat: &BTreeMap<String, Value>) -> Value {
    let mut root = Map::new();
    for (path, value) in flat {
        let mut node = &mut root;
        let mut parts = path.split('.').peekable();
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                node.insert(part.to_string(), value.clone());
                break;
            }
            let child = node
                .entry(part.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !child.is_object() {
                *child = Value::Object(Map::new());
            }
            let Value::Object(next) = child else {
                break;
            };
            node = next;
        }
    }
    Value::Object(root)
}
