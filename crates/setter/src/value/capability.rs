// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-classification operation table.

use super::{Field, Slot, Value};
use crate::error::{Result, SetError};
use crate::reflect::{resolve_mut, Reflect, ReflectMut, ReflectRef};
use crate::types::TypeInfo;
use std::sync::Arc;

/// Operations bound when a [`Value`] is built.
#[derive(Clone, Copy)]
pub(super) struct Methods {
    pub(super) append: for<'s, 'v> fn(&'s mut Value<'v>, &[&dyn Reflect]) -> Result<()>,
    pub(super) fields: for<'s, 'v> fn(&'s mut Value<'v>) -> Vec<Field<'s>>,
    pub(super) fields_by_tag: for<'s, 'v> fn(&'s mut Value<'v>, &str) -> Vec<Field<'s>>,
    pub(super) new_elem: fn(&Value<'_>) -> Result<Value<'static>>,
    pub(super) zero: fn(&mut Value<'_>) -> Result<()>,
}

impl Methods {
    pub(super) const UNSUPPORTED: Methods = Methods {
        append: append_unsupported,
        fields: fields_unsupported,
        fields_by_tag: fields_by_tag_unsupported,
        new_elem: new_elem_unsupported,
        zero: zero_unsupported,
    };

    pub(super) fn select(info: &TypeInfo, can_write: bool) -> Self {
        let mut methods = Self::UNSUPPORTED;
        if info.is_map() || info.is_slice() {
            methods.new_elem = new_elem_supported;
        }
        if can_write {
            methods.zero = zero_supported;
        }
        if info.is_slice() {
            methods.append = append_supported;
        }
        if info.is_struct() {
            methods.fields = fields_supported;
            methods.fields_by_tag = fields_by_tag_supported;
        }
        methods
    }
}

// ============================================================================
// append
// ============================================================================

fn append_supported(value: &mut Value<'_>, items: &[&dyn Reflect]) -> Result<()> {
    let type_name = value.type_name();
    if !value.can_write {
        return Err(SetError::NotAssignable { type_name });
    }

    let mut built = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let mut elem = value.new_elem()?;
        elem.to(*item).map_err(|err| err.in_element(index))?;
        built.extend(elem.into_inner());
    }

    let ReflectMut::List(list) = value.target_mut()?.reflect_mut() else {
        return Err(SetError::unsupported("append", type_name));
    };
    for elem in built {
        list.push_elem(elem)?;
    }
    Ok(())
}

fn append_unsupported(value: &mut Value<'_>, _items: &[&dyn Reflect]) -> Result<()> {
    Err(SetError::unsupported("append", value.type_name()))
}

// ============================================================================
// fields / fields_by_tag
// ============================================================================

fn fields_supported<'s>(value: &'s mut Value<'_>) -> Vec<Field<'s>> {
    let info = Arc::clone(&value.info);
    let values: Vec<Value<'s>> = match &mut value.slot {
        Slot::Ref(target) => {
            let target: &'s dyn Reflect = *target;
            match target.reflect_ref() {
                ReflectRef::Struct(s) => (0..s.field_count())
                    .filter_map(|i| s.field(i))
                    .map(Value::read_only)
                    .collect(),
                _ => Vec::new(),
            }
        }
        Slot::Mut(target) => struct_fields_mut(&mut **target),
        Slot::Owned(boxed) => struct_fields_mut(resolve_mut(&mut **boxed)),
        Slot::Nil => Vec::new(),
    };

    values
        .into_iter()
        .zip(&info.fields)
        .map(|(value, field_info)| Field {
            value,
            info: *field_info,
            tag_value: None,
        })
        .collect()
}

fn struct_fields_mut(target: &mut dyn Reflect) -> Vec<Value<'_>> {
    match target.reflect_mut() {
        ReflectMut::Struct(s) => s.fields_mut().into_iter().map(Value::new).collect(),
        _ => Vec::new(),
    }
}

fn fields_by_tag_supported<'s>(value: &'s mut Value<'_>, key: &str) -> Vec<Field<'s>> {
    fields_supported(value)
        .into_iter()
        .filter_map(|mut field| {
            field.tag_value = Some(field.info.tags.lookup(key)?);
            Some(field)
        })
        .collect()
}

fn fields_unsupported<'s>(_value: &'s mut Value<'_>) -> Vec<Field<'s>> {
    Vec::new()
}

fn fields_by_tag_unsupported<'s>(_value: &'s mut Value<'_>, _key: &str) -> Vec<Field<'s>> {
    Vec::new()
}

// ============================================================================
// new_elem
// ============================================================================

fn new_elem_supported(value: &Value<'_>) -> Result<Value<'static>> {
    match value.info.elem_type {
        Some(ty) => Ok(Value::owned(ty.new_zeroed())),
        None => new_elem_unsupported(value),
    }
}

fn new_elem_unsupported(value: &Value<'_>) -> Result<Value<'static>> {
    Err(SetError::unsupported("new_elem", value.type_name()))
}

// ============================================================================
// zero
// ============================================================================

fn zero_supported(value: &mut Value<'_>) -> Result<()> {
    value.target_mut()?.set_zero();
    Ok(())
}

fn zero_unsupported(value: &mut Value<'_>) -> Result<()> {
    Err(SetError::NotAssignable {
        type_name: value.type_name(),
    })
}
