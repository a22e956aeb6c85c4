//! Schema-tolerant access to Yahoo Fantasy JSON documents.
//!
//! Yahoo encodes resources as arrays of single-key objects nested inside
//! numerically keyed collections (`{"0": {...}, "1": {...}, "count": 2}`),
//! and the position of a given block differs between endpoints. Instead of
//! indexing into fixed positions, a resource is flattened once into a
//! key→value map: arrays are transparent, objects met through arrays are
//! merged, and the first occurrence of a key wins.

use serde_json::{Map, Value};

/// Every value stored under `key`, in document order. Matches are not
/// searched further, so a `player` inside a `player` is never returned.
pub fn collect<'a>(value: &'a Value, key: &str) -> Vec<&'a Value> {
    let mut found = Vec::new();
    collect_into(value, key, &mut found);
    found
}

fn collect_into<'a>(value: &'a Value, key: &str, found: &mut Vec<&'a Value>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_into(item, key, found);
            }
        }
        Value::Object(map) => {
            for (k, v) in ordered_entries(map) {
                if k == key {
                    found.push(v);
                } else {
                    collect_into(v, key, found);
                }
            }
        }
        _ => {}
    }
}

/// Object entries with numeric keys in numeric order ahead of the rest.
fn ordered_entries(map: &Map<String, Value>) -> Vec<(&String, &Value)> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by_key(|(k, _)| match k.parse::<u64>() {
        Ok(n) => (0, n),
        Err(_) => (1, 0),
    });
    entries
}

/// One flattened resource: a player, team or league.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatRecord {
    fields: Map<String, Value>,
}

impl FlatRecord {
    pub fn from_value(value: &Value) -> Self {
        let mut fields = Map::new();
        flatten_into(value, &mut fields);
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Scalar value under `key`; numbers are rendered, blanks are `None`.
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(scalar_text)
    }

    /// `key.sub`, where `key` holds an object or an array of single-key
    /// blocks (as `percent_owned` does).
    pub fn nested_text(&self, key: &str, sub: &str) -> Option<String> {
        match self.get(key)? {
            Value::Object(map) => map.get(sub).and_then(scalar_text),
            Value::Array(items) => items
                .iter()
                .filter_map(|item| item.get(sub))
                .find_map(scalar_text),
            _ => None,
        }
    }

    /// Comma-joined list under `key`. Items may be plain strings or objects
    /// carrying the value under `item_key`.
    pub fn list_text(&self, key: &str, item_key: &str) -> Option<String> {
        let item_text = |item: &Value| match item {
            Value::Object(map) => map.get(item_key).and_then(scalar_text),
            other => scalar_text(other),
        };
        let joined = match self.get(key)? {
            Value::Array(items) => items
                .iter()
                .filter_map(item_text)
                .collect::<Vec<_>>()
                .join(","),
            other => item_text(other)?,
        };
        (!joined.is_empty()).then_some(joined)
    }
}

impl From<Map<String, Value>> for FlatRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

fn flatten_into(value: &Value, fields: &mut Map<String, Value>) {
    match value {
        Value::Array(items) => {
            for item in items {
                flatten_into(item, fields);
            }
        }
        Value::Object(map) => {
            for (k, v) in ordered_entries(map) {
                if !fields.contains_key(k) {
                    fields.insert(k.clone(), v.clone());
                }
            }
        }
        _ => {}
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
