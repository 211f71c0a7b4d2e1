// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Tests for the built-in reflection implementations.

use super::*;
use crate::SetError;

#[test]
fn test_scalar_views() {
    let mut n = 42i32;
    assert_eq!(n.reflect_ref().kind_of_scalar(), Some(ScalarRef::I32(42)));

    match n.reflect_mut() {
        ReflectMut::Scalar(ScalarMut::I32(slot)) => *slot = 7,
        _ => panic!("i32 should expose a scalar slot"),
    }
    assert_eq!(n, 7);

    let text = String::from("hi");
    assert_eq!(text.reflect_ref().kind_of_scalar(), Some(ScalarRef::String("hi")));

    let mut literal: &'static str = "lit";
    assert!(matches!(literal.reflect_mut(), ReflectMut::Other));
    assert_eq!(ScalarRef::F32(1.5).to_string(), "1.5");
    assert_eq!(ScalarRef::String("x").to_string(), "x");
}

#[test]
fn test_set_zero_and_assign_from() {
    let mut v = vec![1u8, 2, 3];
    v.set_zero();
    assert!(v.is_empty());

    let mut s = String::from("old");
    assert!(s.assign_from(&String::from("new")));
    assert_eq!(s, "new");
    assert!(!s.assign_from(&5i32));
    assert_eq!(s, "new");
}

#[test]
fn test_option_allocates_on_deref() {
    let mut slot: Option<Box<Option<u16>>> = None;
    assert!(slot.is_pointer());

    let leaf = resolve_mut(&mut slot);
    assert_eq!(leaf.type_key(), crate::TypeKey::of::<u16>());
    assert_eq!(slot, Some(Box::new(Some(0))));
}

#[test]
fn test_resolve_ref_stops_at_nil() {
    let nil: Option<i32> = None;
    assert!(resolve_ref(&nil).is_none());

    let set = Some(Box::new(3i64));
    let leaf = resolve_ref(&set).expect("non-nil chain");
    assert_eq!(leaf.as_any().downcast_ref::<i64>(), Some(&3));
}

#[test]
fn test_dynamic_box_is_looked_through() {
    let boxed: Box<dyn Reflect> = Box::new(String::from("inside"));
    let inner = dynamic(&boxed);
    assert_eq!(inner.type_key(), crate::TypeKey::of::<String>());

    let mut slot: Box<dyn Reflect> = Box::new(());
    assert!(slot.assign_from(&boxed));
    assert_eq!(
        (*slot).as_any().downcast_ref::<String>().map(String::as_str),
        Some("inside")
    );
}

#[test]
fn test_vec_list_push_checks_element_type() {
    let mut v: Vec<i32> = Vec::new();
    List::push_elem(&mut v, Box::new(5i32)).expect("matching element");
    assert_eq!(v, vec![5]);

    let err = List::push_elem(&mut v, Box::new(5u8)).unwrap_err();
    assert!(matches!(err, SetError::ElementType { expected: "i32", got: "u8" }));
    assert_eq!(List::len(&v), 1);
    assert!(List::elem(&v, 1).is_none());
}

#[test]
fn test_debug_output() {
    let value: Box<dyn Reflect> = Box::new(vec![Some(1u8), None]);
    assert_eq!(format!("{:?}", value), "[Some(U8(1)), nil]");
}

impl ReflectRef<'_> {
    fn kind_of_scalar(&self) -> Option<ScalarRef<'_>> {
        match self {
            ReflectRef::Scalar(s) => Some(*s),
            _ => None,
        }
    }
}
