//! Collapses a nested JSON block into `path -> scalar` pairs.
//!
//! Object keys are joined with `.` and array indices appended as `[i]`, so
//! `{"offers":[{"size":"L"}]}` becomes `offers[0].size -> "L"`. Fields can
//! then be searched by name without knowing the page's schema.

use std::collections::HashMap;

use serde_json::{Number, Value};

/// A leaf value from a structured-data block.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Number(Number),
    Boolean(bool),
}

impl Scalar {
    /// Text form used for pattern matching only. Numbers keep their JSON
    /// spelling (`3`, `2.5`) and booleans render as `true`/`false`.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Scalar::String(s) => s.clone(),
            Scalar::Number(n) => n.to_string(),
            Scalar::Boolean(b) => b.to_string(),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_owned())
    }
}

/// Ordered `path -> scalar` mapping produced from one block.
///
/// Paths are unique: inserting an existing path replaces its value without
/// moving it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatRecord {
    entries: Vec<(String, Scalar)>,
    index: HashMap<String, usize>,
}

impl FlatRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: String, value: Scalar) {
        if let Some(&pos) = self.index.get(&path) {
            self.entries[pos].1 = value;
        } else {
            self.index.insert(path.clone(), self.entries.len());
            self.entries.push((path, value));
        }
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Scalar> {
        self.index.get(path).map(|&pos| &self.entries[pos].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Flattens one block depth-first. `null` leaves and empty containers
/// contribute nothing.
#[must_use]
pub fn flatten(block: &Value) -> FlatRecord {
    let mut out = FlatRecord::new();
    flatten_into(block, "", &mut out);
    out
}

fn flatten_into(value: &Value, prefix: &str, out: &mut FlatRecord) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(child, &path, out);
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                flatten_into(child, &format!("{prefix}[{i}]"), out);
            }
        }
        Value::String(s) => out.insert(prefix.to_owned(), Scalar::String(s.clone())),
        Value::Number(n) => out.insert(prefix.to_owned(), Scalar::Number(n.clone())),
        Value::Bool(b) => out.insert(prefix.to_owned(), Scalar::Boolean(*b)),
        Value::Null => {}
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn paths(record: &FlatRecord) -> Vec<&str> {
        record.iter().map(|(k, _)| k).collect()
    }

    #[test]
    fn nests_keys_with_dots_and_indices_with_brackets() {
        let flat = flatten(&json!({
            "offers": [{"size": "L", "price": 12.5}],
            "brand": {"name": "Acme"}
        }));
        assert_eq!(
            paths(&flat),
            vec!["offers[0].size", "offers[0].price", "brand.name"]
        );
        assert_eq!(flat.get("offers[0].size"), Some(&Scalar::from("L")));
    }

    #[test]
    fn root_array_uses_bare_index() {
        let flat = flatten(&json!([{"sku": "A1"}, "loose"]));
        assert_eq!(paths(&flat), vec!["[0].sku", "[1]"]);
    }

    #[test]
    fn keeps_scalar_types() {
        let flat = flatten(&json!({"qty": 3, "live": true, "label": "M"}));
        assert!(matches!(flat.get("qty"), Some(Scalar::Number(_))));
        assert_eq!(flat.get("live"), Some(&Scalar::Boolean(true)));
        assert_eq!(flat.get("qty").map(Scalar::as_text).as_deref(), Some("3"));
    }

    #[test]
    fn drops_nulls_and_empty_containers() {
        let flat = flatten(&json!({"a": null, "b": [], "c": {}, "d": "x"}));
        assert_eq!(paths(&flat), vec!["d"]);
    }

    #[test]
    fn flat_mapping_is_unchanged() {
        let input = json!({"size": "S", "availability": "InStock", "qty": 2});
        let flat = flatten(&input);
        let map = input.as_object().unwrap();
        assert_eq!(flat.len(), map.len());
        for (key, value) in map {
            assert_eq!(
                flat.get(key).map(Scalar::as_text),
                Some(match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
            );
        }
    }

    #[test]
    fn flattening_is_deterministic() {
        let input = json!({"variants": [{"name": "S", "inventory": {"qty": 1}}, {"name": "M"}]});
        assert_eq!(flatten(&input), flatten(&input));
    }

    #[test]
    fn colliding_paths_keep_first_position_and_last_value() {
        let flat = flatten(&json!({"a.b": 1, "z": 0, "a": {"b": 2}}));
        assert_eq!(paths(&flat), vec!["a.b", "z"]);
        assert_eq!(flat.get("a.b").map(Scalar::as_text).as_deref(), Some("2"));
    }
}
