//! Data file loading and shape normalization
//!
//! Input files are JSON. The parsed document may be a bare array of records,
//! an object pairing embedded `meta` with `data`, or an object wrapping its
//! record list under one of a few conventional keys. Whatever the shape,
//! loading produces one canonical record sequence in source order.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde_json::Value;
use std::path::Path;

/// Records plus optional embedded metadata from one input file.
///
/// `records` preserves source order and is never reordered or deduplicated.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedData {
    pub records: Vec<Value>,
    pub meta: IndexMap<String, Value>,
    pub has_meta: bool,
}

impl LoadedData {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Wrapper keys tried, in priority order, when an object carries its record
/// list without embedded metadata.
const RECORD_LIST_KEYS: &[&str] = &["data", "records", "items", "results"];

/// Normalizes parsed JSON content into a canonical [`LoadedData`].
///
/// The accepted shapes are tried in a fixed order; notably an object with
/// both `meta` and `data` is always treated as the metadata shape and never
/// falls through to wrapper-key detection.
pub fn normalize_data(content: Value) -> Result<LoadedData> {
    // Bare array: every element is a record.
    if let Value::Array(records) = content {
        return Ok(LoadedData { records, meta: IndexMap::new(), has_meta: false });
    }

    let Value::Object(mut map) = content else {
        return Err(Error::Data("invalid JSON format: expected object or array".into()));
    };

    // Embedded metadata shape: {"meta": {...}, "data": [...]}.
    if map.contains_key("meta") && map.contains_key("data") {
        let meta = match map.remove("meta") {
            Some(Value::Object(meta)) => meta.into_iter().collect(),
            _ => return Err(Error::Data("'meta' must be an object".into())),
        };
        let records = match map.remove("data") {
            Some(Value::Array(records)) => records,
            _ => return Err(Error::Data("'data' must be an array".into())),
        };
        return Ok(LoadedData { records, meta, has_meta: true });
    }

    // Conventional wrapper keys, first list-valued key wins.
    for key in RECORD_LIST_KEYS {
        if !matches!(map.get(*key), Some(Value::Array(_))) {
            continue;
        }
        if let Some(Value::Array(records)) = map.remove(*key) {
            return Ok(LoadedData { records, meta: IndexMap::new(), has_meta: false });
        }
    }

    Err(Error::Data(
        "unrecognized data format: expected an array, an object with 'meta'/'data' keys, \
         or an object with a 'data', 'records', 'items', or 'results' list"
            .into(),
    ))
}

/// Loads a JSON data file and normalizes its shape.
pub fn load_data(path: &Path) -> Result<LoadedData> {
    if !path.exists() {
        return Err(Error::Data(format!("data file not found: {}", path.display())));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|err| Error::Data(format!("cannot read {}: {err}", path.display())))?;

    let parsed: Value = serde_json::from_str(&content)
        .map_err(|err| Error::Data(format!("invalid JSON in {}: {err}", path.display())))?;

    normalize_data(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_array() {
        let loaded = normalize_data(json!([{"id": 1}, {"id": 2}])).unwrap();
        assert_eq!(loaded.records, vec![json!({"id": 1}), json!({"id": 2})]);
        assert!(!loaded.has_meta);
        assert!(loaded.meta.is_empty());
        assert_eq!(loaded.len(), 2);
    }

    #[test]
    fn test_meta_and_data_object() {
        let loaded =
            normalize_data(json!({"meta": {"v": 1}, "data": [{"id": 1}]})).unwrap();
        assert!(loaded.has_meta);
        assert_eq!(loaded.meta["v"], json!(1));
        assert_eq!(loaded.records, vec![json!({"id": 1})]);
    }

    #[test]
    fn test_meta_shape_takes_priority_over_wrapper_keys() {
        // `data` is a valid wrapper key on its own, but pairing it with
        // `meta` must select the metadata shape.
        let loaded = normalize_data(
            json!({"meta": {"source": "census"}, "data": [], "records": [{"id": 9}]}),
        )
        .unwrap();
        assert!(loaded.has_meta);
        assert!(loaded.records.is_empty());
    }

    #[test]
    fn test_non_object_meta_rejected() {
        let err = normalize_data(json!({"meta": 3, "data": []})).unwrap_err();
        assert!(matches!(err, Error::Data(_)));
        assert!(err.to_string().contains("'meta' must be an object"), "{err}");
    }

    #[test]
    fn test_non_array_data_rejected() {
        let err = normalize_data(json!({"meta": {}, "data": {"id": 1}})).unwrap_err();
        assert!(err.to_string().contains("'data' must be an array"), "{err}");
    }

    #[test]
    fn test_wrapper_keys_in_priority_order() {
        for key in ["data", "records", "items", "results"] {
            let loaded = normalize_data(json!({key: [{"id": 1}]})).unwrap();
            assert_eq!(loaded.records, vec![json!({"id": 1})], "key {key}");
            assert!(!loaded.has_meta);
        }

        // `data` outranks `records` when both hold lists.
        let loaded =
            normalize_data(json!({"records": [{"id": 2}], "data": [{"id": 1}]})).unwrap();
        assert_eq!(loaded.records, vec![json!({"id": 1})]);
    }

    #[test]
    fn test_non_list_wrapper_value_falls_through() {
        // A scalar `data` is skipped; the list under `items` still matches.
        let loaded = normalize_data(json!({"data": 42, "items": [{"id": 3}]})).unwrap();
        assert_eq!(loaded.records, vec![json!({"id": 3})]);
    }

    #[test]
    fn test_unrecognized_object_rejected() {
        let err = normalize_data(json!({"foo": 1})).unwrap_err();
        assert!(matches!(err, Error::Data(_)));
        assert!(err.to_string().contains("unrecognized data format"), "{err}");
    }

    #[test]
    fn test_scalar_content_rejected() {
        let err = normalize_data(json!("just a string")).unwrap_err();
        assert!(err.to_string().contains("expected object or array"), "{err}");
    }

    #[test]
    fn test_record_order_preserved() {
        let records: Vec<Value> = (0..10).map(|i| json!({"id": i})).collect();
        let loaded = normalize_data(Value::Array(records.clone())).unwrap();
        assert_eq!(loaded.records, records);
    }

    #[test]
    fn test_load_data_missing_file() {
        let err = load_data(Path::new("/nonexistent/data.json")).unwrap_err();
        assert!(err.to_string().contains("data file not found"), "{err}");
    }

    #[test]
    fn test_load_data_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = load_data(&path).unwrap_err();
        assert!(matches!(err, Error::Data(_)));
        assert!(err.to_string().contains("invalid JSON"), "{err}");
    }

    #[test]
    fn test_load_data_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("animals.json");
        std::fs::write(&path, r#"{"meta": {"v": 2}, "data": [{"slug": "owl"}]}"#).unwrap();
        let loaded = load_data(&path).unwrap();
        assert!(loaded.has_meta);
        assert_eq!(loaded.meta["v"], json!(2));
        assert_eq!(loaded.records, vec![json!({"slug": "owl"})]);
    }
}
