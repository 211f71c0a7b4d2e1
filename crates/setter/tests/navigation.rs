// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Positional field navigation
//!
//! Paths are indexes among visible fields. Nil pointers on the way are
//! allocated; bad steps report which index failed and why.

use setter::{v, SetError, Settable, TypeKey, Value};

#[derive(Clone, Debug, Default, PartialEq, Settable)]
pub struct Leaf {
    pub value: i32,
    pub label: String,
}

#[derive(Clone, Debug, Default, PartialEq, Settable)]
pub struct Middle {
    pub leaf: Option<Box<Leaf>>,
    pub count: u8,
}

#[derive(Clone, Debug, Default, PartialEq, Settable)]
pub struct Root {
    pub name: String,
    hidden: u8,
    pub middle: Option<Middle>,
    pub list: Vec<Leaf>,
}

#[test]
fn test_path_allocates_pointer_chain() {
    let mut root = Root::default();
    {
        let mut value = v(&mut root);
        let mut leaf_value = value.field_by_index(&[1, 0, 0]).unwrap();
        assert!(leaf_value.info().is_scalar());
        leaf_value.to(&"42").unwrap();
    }

    let middle = root.middle.expect("middle allocated");
    assert_eq!(middle.count, 0);
    assert_eq!(
        middle.leaf,
        Some(Box::new(Leaf { value: 42, label: String::new() }))
    );
}

#[test]
fn test_navigated_wrapper_keeps_declared_field_type() {
    let mut root = Root::default();
    let mut value = v(&mut root);

    let leaf = value.field_by_index(&[1, 0]).unwrap();
    assert_eq!(leaf.top_type(), Some(TypeKey::of::<Option<Box<Leaf>>>()));
    assert_eq!(leaf.info().ty, Some(TypeKey::of::<Leaf>()));
    assert!(leaf.info().is_struct());
    drop(leaf);

    let label = value.field_by_index(&[1, 0, 1]).unwrap();
    assert_eq!(label.top_type(), Some(TypeKey::of::<String>()));
}

#[test]
fn test_hidden_fields_are_skipped_by_index() {
    let mut root = Root::default();
    v(&mut root)
        .field_by_index(&[1])
        .unwrap()
        .to(&Middle { leaf: None, count: 7 })
        .unwrap();
    assert_eq!(root.hidden, 0);
    assert_eq!(root.middle.map(|m| m.count), Some(7));
}

#[test]
fn test_index_out_of_range() {
    let mut root = Root::default();
    let mut value = v(&mut root);

    match value.field_by_index(&[3]) {
        Err(SetError::IndexOutOfRange { index, len, .. }) => {
            assert_eq!(index, 3);
            assert_eq!(len, 3);
        }
        other => panic!("unexpected {:?}", other),
    }

    match value.field_by_index(&[1, 2]) {
        Err(SetError::IndexOutOfRange { index, len, .. }) => {
            assert_eq!(index, 2);
            assert_eq!(len, 2);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_invalid_paths() {
    let mut root = Root::default();
    let mut value = v(&mut root);

    assert!(matches!(value.field_by_index(&[]), Err(SetError::InvalidPath(_))));
    assert!(matches!(value.field_by_index(&[0, 0]), Err(SetError::InvalidPath(_))));
    assert!(matches!(value.field_by_index(&[2, 0]), Err(SetError::InvalidPath(_))));
}

#[test]
fn test_read_only_navigation_is_refused() {
    let root = Root::default();
    let mut value = Value::read_only(&root);
    assert!(matches!(
        value.field_by_index(&[0]),
        Err(SetError::NotAssignable { .. })
    ));
}

#[test]
fn test_wrap_allocates_top_level_only() {
    let mut slot: Option<Middle> = None;
    let value = v(&mut slot);
    assert!(value.info().is_struct());
    drop(value);
    assert_eq!(slot, Some(Middle { leaf: None, count: 0 }));
}
