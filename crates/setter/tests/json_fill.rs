// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! JSON document fill tests
//!
//! `serde_json` objects drive struct population: objects become nested
//! getters, arrays of objects become getter lists, everything else is
//! coerced field by field.

use serde_json::json;
use setter::{v, SetError, Settable};

#[derive(Clone, Debug, Default, PartialEq, Settable)]
pub struct Customer {
    pub name: String,
    pub vip: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Settable)]
pub struct Item {
    pub sku: String,
    pub qty: u32,
    pub price: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Settable)]
pub struct Order {
    #[tag(json = "order_id")]
    pub id: u64,
    pub customer: Customer,
    pub items: Vec<Item>,
    pub tags: Vec<String>,
    pub note: Option<String>,
    pub paid: bool,
}

#[test]
fn test_fill_order_from_document() {
    let doc = json!({
        "id": 1001,
        "customer": {"name": "Acme", "vip": "true"},
        "items": [
            {"sku": "A-1", "qty": 3.9, "price": 9.5},
            {"sku": "B-2", "qty": "2", "price": 1}
        ],
        "tags": ["x", 5, true],
        "note": null,
        "paid": 1
    });

    let mut order = Order::default();
    v(&mut order).fill(&doc).unwrap();

    assert_eq!(order.id, 1001);
    assert_eq!(order.customer, Customer { name: "Acme".into(), vip: true });
    assert_eq!(
        order.items,
        vec![
            Item { sku: "A-1".into(), qty: 3, price: 9.5 },
            Item { sku: "B-2".into(), qty: 2, price: 1.0 },
        ]
    );
    assert_eq!(order.tags, vec!["x", "5", "true"]);
    // Pointer fields are allocated when enumerated; null leaves the zero value
    assert_eq!(order.note.as_deref(), Some(""));
    assert!(order.paid);
}

#[test]
fn test_fill_by_tag_uses_json_names() {
    let doc = json!({"order_id": "77", "id": 1, "paid": true});

    let mut order = Order::default();
    v(&mut order).fill_by_tag("json", &doc).unwrap();

    assert_eq!(order.id, 77);
    assert!(!order.paid);
}

#[test]
fn test_object_into_slice_and_array_into_struct() {
    let doc = json!({
        "items": {"sku": "solo", "qty": 1},
        "customer": [{"name": "first"}, {"name": "last", "vip": true}]
    });

    let mut order = Order::default();
    v(&mut order).fill(&doc).unwrap();

    assert_eq!(order.items, vec![Item { sku: "solo".into(), qty: 1, price: 0.0 }]);
    assert_eq!(order.customer, Customer { name: "last".into(), vip: true });
}

#[test]
fn test_error_reports_nested_path() {
    let doc = json!({
        "items": [{"sku": "ok", "qty": 1}, {"sku": "bad", "qty": "lots"}]
    });

    let mut order = Order::default();
    let err = v(&mut order).fill(&doc).unwrap_err();

    assert_eq!(err.field_path(), vec!["items", "qty"]);
    assert!(matches!(err.root(), SetError::Coercion { target: "u32", .. }));
    assert!(err.to_string().contains("lots"));
}

#[test]
fn test_object_into_scalar_is_a_shape_mismatch() {
    let doc = json!({"paid": {"yes": true}});

    let mut order = Order::default();
    let err = v(&mut order).fill(&doc).unwrap_err();
    assert!(matches!(
        err.root(),
        SetError::ShapeMismatch { field: "paid", got: "a getter", .. }
    ));
}

#[test]
fn test_map_getter() {
    let doc = json!({"name": "direct", "vip": 0});
    let map = doc.as_object().cloned().unwrap_or_default();

    let mut customer = Customer { name: String::new(), vip: true };
    v(&mut customer).fill(&map).unwrap();
    assert_eq!(customer, Customer { name: "direct".into(), vip: false });
}
