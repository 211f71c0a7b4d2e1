// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Struct fields and positional navigation.

use super::{Slot, Value};
use crate::error::{Result, SetError};
use crate::reflect::{resolve_mut, ReflectMut};
use crate::types::{type_cache, FieldInfo};

/// One visible struct field, produced by [`Value::fields`] and
/// [`Value::fields_by_tag`].
#[derive(Debug)]
pub struct Field<'a> {
    /// Wrapper on the field's storage.
    pub value: Value<'a>,
    /// Static description of the field.
    pub info: FieldInfo,
    /// Annotation value, set by [`Value::fields_by_tag`].
    pub tag_value: Option<&'static str>,
}

impl Field<'_> {
    pub fn name(&self) -> &'static str {
        self.info.name
    }
}

impl Value<'_> {
    /// Walk a path of visible-field indexes and wrap the field at its end.
    ///
    /// The returned wrapper's [`Value::top_type`] is the field's declared type.
    ///
    /// Nil pointers met along the way, including at the final field, are
    /// allocated. Fails with [`SetError::IndexOutOfRange`] for an index past
    /// the last visible field and [`SetError::InvalidPath`] for an empty path
    /// or a step through a non-struct.
    ///
    /// # Example
    ///
    /// ```rust
    /// use setter::{v, Settable};
    ///
    /// #[derive(Clone, Default, Settable)]
    /// pub struct Inner {
    ///     pub depth: u8,
    /// }
    ///
    /// #[derive(Clone, Default, Settable)]
    /// pub struct Outer {
    ///     pub inner: Option<Box<Inner>>,
    /// }
    ///
    /// let mut outer = Outer::default();
    /// v(&mut outer).field_by_index(&[0, 0]).unwrap().to(&3).unwrap();
    /// assert_eq!(outer.inner.map(|i| i.depth), Some(3));
    /// ```
    pub fn field_by_index(&mut self, path: &[usize]) -> Result<Value<'_>> {
        if self.is_nil() {
            return Err(SetError::NilReceiver);
        }
        if path.is_empty() {
            return Err(SetError::InvalidPath("empty index path".to_string()));
        }

        let mut current = self.target_mut()?;
        let mut declared = current.type_key();
        for &index in path {
            let type_name = current.type_key().name();
            current = match current.reflect_mut() {
                ReflectMut::Struct(s) => {
                    let len = s.field_count();
                    match s.field_mut(index) {
                        Some(field) if index < len => {
                            declared = field.type_key();
                            resolve_mut(field)
                        }
                        _ => {
                            return Err(SetError::IndexOutOfRange {
                                index,
                                len,
                                type_name,
                            })
                        }
                    }
                }
                _ => {
                    return Err(SetError::InvalidPath(format!(
                        "cannot descend into field {} of {}, which is not a struct",
                        index, type_name
                    )))
                }
            };
        }
        let info = type_cache().stat_type(declared);
        Ok(Value::build(info, Some(declared), true, Slot::Mut(current)))
    }
}
