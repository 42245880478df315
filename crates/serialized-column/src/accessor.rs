//! Key-by-key access to a decoded store.

use std::fmt::Display;

use serde_json::{Map, Value};

/// Reads and writes individual keys of a JSON object store.
///
/// Keys are indifferent: anything that displays as the same string addresses
/// the same entry, so `"7"` and `7` are one key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndifferentHashAccessor;

impl IndifferentHashAccessor {
    /// Turns a null or non-object store into an empty object.
    pub fn prepare(&self, store: &mut Value) {
        if !store.is_object() {
            *store = Value::Object(Map::new());
        }
    }

    /// Returns the value under `key`, or `None` if absent or the store is not an object.
    pub fn read<'a>(&self, store: &'a Value, key: impl Display) -> Option<&'a Value> {
        store.as_object()?.get(&key.to_string())
    }

    /// Writes `value` under `key` unless it already holds an equal value.
    ///
    /// A non-object store is prepared first. Writing `null` to an absent key
    /// is not a change. Returns true if the key was written.
    pub fn write(&self, store: &mut Value, key: impl Display, value: Value) -> bool {
        let key = key.to_string();
        match store {
            Value::Object(map) => {
                if map.get(&key).unwrap_or(&Value::Null) == &value {
                    return false;
                }
                map.insert(key, value);
                true
            }
            other => {
                let mut map = Map::new();
                let written = !value.is_null();
                if written {
                    map.insert(key, value);
                }
                *other = Value::Object(map);
                written
            }
        }
    }

    /// Returns the keys of the store, in the store's iteration order.
    pub fn keys<'a>(&self, store: &'a Value) -> Vec<&'a str> {
        store
            .as_object()
            .map(|map| map.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_prepare_replaces_null() {
        let mut store = Value::Null;
        IndifferentHashAccessor.prepare(&mut store);
        assert_eq!(store, json!({}));
    }

    #[test]
    fn test_prepare_keeps_object() {
        let mut store = json!({"a": 1});
        IndifferentHashAccessor.prepare(&mut store);
        assert_eq!(store, json!({"a": 1}));
    }

    #[test]
    fn test_write_prepares_non_object() {
        let mut store = json!([1, 2]);
        assert!(!IndifferentHashAccessor.write(&mut store, "a", Value::Null));
        assert_eq!(store, json!({}));

        let mut store = Value::Null;
        assert!(IndifferentHashAccessor.write(&mut store, "a", json!(1)));
        assert_eq!(store, json!({"a": 1}));
    }

    #[test]
    fn test_indifferent_keys() {
        let mut store = json!({});
        assert!(IndifferentHashAccessor.write(&mut store, 7, json!("seven")));
        assert_eq!(IndifferentHashAccessor.read(&store, "7"), Some(&json!("seven")));
        assert_eq!(IndifferentHashAccessor.read(&store, 7), Some(&json!("seven")));
    }

    #[test]
    fn test_write_skips_equal_value() {
        let mut store = json!({"theme": "dark"});
        assert!(!IndifferentHashAccessor.write(&mut store, "theme", json!("dark")));
        assert!(!IndifferentHashAccessor.write(&mut store, "missing", Value::Null));
        assert_eq!(store, json!({"theme": "dark"}));
        assert!(IndifferentHashAccessor.write(&mut store, "theme", json!("light")));
        assert_eq!(store, json!({"theme": "light"}));
    }

    #[test]
    fn test_read_non_object() {
        assert_eq!(IndifferentHashAccessor.read(&json!([1]), "0"), None);
        assert!(IndifferentHashAccessor.keys(&Value::Null).is_empty());
    }

    #[test]
    fn test_keys() {
        let store = json!({"b": 1, "a": 2});
        assert_eq!(IndifferentHashAccessor.keys(&store), vec!["a", "b"]);
    }
}
