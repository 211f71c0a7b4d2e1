// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! `serde_json` documents as getters.
//!
//! | JSON | [`Got`] |
//! |------|---------|
//! | `null` | `Nil` |
//! | bool, number, string | `Value` of `bool`, `i64`/`u64`/`f64`, `String` |
//! | object | `Getter` |
//! | non-empty array of objects | `Getters` |
//! | any other array | `Value` of `Vec<Box<dyn Reflect>>` |

use super::{Getter, Got};
use crate::reflect::Reflect;
use serde_json::{Map, Number, Value};
use std::sync::Arc;

impl Getter for Value {
    fn get(&self, key: &str) -> Got {
        match self {
            Value::Object(map) => map.get(key).map_or(Got::Nil, got),
            _ => Got::Nil,
        }
    }
}

impl Getter for Map<String, Value> {
    fn get(&self, key: &str) -> Got {
        Map::get(self, key).map_or(Got::Nil, got)
    }
}

fn got(value: &Value) -> Got {
    match value {
        Value::Null => Got::Nil,
        Value::Object(map) => Got::Getter(Arc::new(map.clone())),
        Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_object) => {
            Got::Getters(
                items
                    .iter()
                    .filter_map(Value::as_object)
                    .map(|map| Arc::new(map.clone()) as Arc<dyn Getter>)
                    .collect(),
            )
        }
        other => Got::Value(reflect(other)),
    }
}

/// Convert a JSON value that is not an object into owned reflected storage.
fn reflect(value: &Value) -> Box<dyn Reflect> {
    match value {
        Value::Bool(b) => Box::new(*b),
        Value::Number(n) => number(n),
        Value::String(s) => Box::new(s.clone()),
        Value::Array(items) => Box::new(items.iter().map(reflect).collect::<Vec<_>>()),
        Value::Null | Value::Object(_) => Box::new(()),
    }
}

fn number(n: &Number) -> Box<dyn Reflect> {
    if let Some(i) = n.as_i64() {
        Box::new(i)
    } else if let Some(u) = n.as_u64() {
        Box::new(u)
    } else {
        Box::new(n.as_f64().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_mapping() {
        let doc = json!({
            "id": 7,
            "big": u64::MAX,
            "ratio": 0.5,
            "name": "x",
            "none": null,
            "child": {"a": 1},
            "rows": [{"a": 1}, {"a": 2}],
            "tags": ["p", "q"],
            "empty": []
        });

        assert_eq!(Getter::get(&doc, "id").kind(), "value");
        assert_eq!(Getter::get(&doc, "none").kind(), "nil");
        assert_eq!(Getter::get(&doc, "missing").kind(), "nil");
        assert_eq!(Getter::get(&doc, "child").kind(), "getter");
        assert_eq!(Getter::get(&doc, "empty").kind(), "value");
        assert!(matches!(Getter::get(&doc, "rows"), Got::Getters(list) if list.len() == 2));

        let Got::Value(big) = Getter::get(&doc, "big") else {
            panic!("number should map to a value");
        };
        assert_eq!((*big).as_any().downcast_ref::<u64>(), Some(&u64::MAX));

        let Got::Value(tags) = Getter::get(&doc, "tags") else {
            panic!("scalar array should map to a value");
        };
        let tags = (*tags)
            .as_any()
            .downcast_ref::<Vec<Box<dyn Reflect>>>()
            .expect("array of boxed values");
        assert_eq!(tags.len(), 2);
    }
}
