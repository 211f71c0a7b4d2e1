// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Built-in implementations for containers, pointers and untyped nil.

use super::{dynamic, List, Reflect, ReflectMut, ReflectRef, Settable};
use crate::error::{Result, SetError};
use crate::types::{Shape, TypeKey};
use std::any::type_name;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

// ============================================================================
// Sequences
// ============================================================================

impl<T: Settable> Settable for Vec<T> {
    fn shape() -> Shape {
        Shape::Slice {
            elem: TypeKey::of::<T>(),
        }
    }

    fn zero() -> Self {
        Vec::new()
    }

    fn view(&self) -> ReflectRef<'_> {
        ReflectRef::List(self)
    }

    fn view_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::List(self)
    }
}

impl<T: Settable> List for Vec<T> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn elem(&self, index: usize) -> Option<&dyn Reflect> {
        self.as_slice().get(index).map(|v| v as &dyn Reflect)
    }

    fn push_elem(&mut self, value: Box<dyn Reflect>) -> Result<()> {
        let got = (*value).type_key().name();
        match value.into_any().downcast::<T>() {
            Ok(elem) => {
                self.push(*elem);
                Ok(())
            }
            Err(_) => Err(SetError::ElementType {
                expected: type_name::<T>(),
                got,
            }),
        }
    }
}

// ============================================================================
// Maps
// ============================================================================

impl<K, V> Settable for HashMap<K, V>
where
    K: Settable + Eq + Hash,
    V: Settable,
{
    fn shape() -> Shape {
        Shape::Map {
            key: TypeKey::of::<K>(),
            elem: TypeKey::of::<V>(),
        }
    }

    fn zero() -> Self {
        HashMap::new()
    }

    fn view(&self) -> ReflectRef<'_> {
        ReflectRef::Map
    }

    fn view_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Other
    }
}

impl<K, V> Settable for BTreeMap<K, V>
where
    K: Settable + Ord,
    V: Settable,
{
    fn shape() -> Shape {
        Shape::Map {
            key: TypeKey::of::<K>(),
            elem: TypeKey::of::<V>(),
        }
    }

    fn zero() -> Self {
        BTreeMap::new()
    }

    fn view(&self) -> ReflectRef<'_> {
        ReflectRef::Map
    }

    fn view_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Other
    }
}

// ============================================================================
// Indirection
// ============================================================================

impl<T: Settable> Settable for Option<T> {
    fn shape() -> Shape {
        Shape::Pointer {
            pointee: TypeKey::of::<T>(),
        }
    }

    fn zero() -> Self {
        None
    }

    fn view(&self) -> ReflectRef<'_> {
        ReflectRef::Pointer(self.as_ref().map(|v| v as &dyn Reflect))
    }

    fn view_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Other
    }

    fn pointee_alloc(&mut self) -> &mut dyn Reflect {
        if self.is_none() {
            log::trace!("[reflect] allocating nil {}", type_name::<Self>());
        }
        self.get_or_insert_with(T::zero)
    }
}

impl<T: Settable> Settable for Box<T> {
    fn shape() -> Shape {
        Shape::Pointer {
            pointee: TypeKey::of::<T>(),
        }
    }

    fn zero() -> Self {
        Box::new(T::zero())
    }

    fn view(&self) -> ReflectRef<'_> {
        ReflectRef::Pointer(Some(&**self as &dyn Reflect))
    }

    fn view_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Other
    }

    fn pointee_alloc(&mut self) -> &mut dyn Reflect {
        &mut **self
    }
}

/// Dynamic slot: accepts a clone of any source.
impl Settable for Box<dyn Reflect> {
    fn shape() -> Shape {
        Shape::Interface
    }

    fn zero() -> Self {
        Box::new(())
    }

    fn view(&self) -> ReflectRef<'_> {
        ReflectRef::Interface(&**self)
    }

    fn view_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Other
    }

    fn try_assign(&mut self, src: &dyn Reflect) -> bool {
        *self = dynamic(src).clone_boxed();
        true
    }
}

// ============================================================================
// Untyped nil
// ============================================================================

impl Settable for () {
    fn shape() -> Shape {
        Shape::Nil
    }

    fn zero() -> Self {}

    fn view(&self) -> ReflectRef<'_> {
        ReflectRef::Nil
    }

    fn view_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Other
    }
}
