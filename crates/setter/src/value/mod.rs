// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The value wrapper.
//!
//! A [`Value`] binds a cached [`TypeInfo`] to one concrete location and
//! exposes the operations that make sense for its classification:
//!
//! | Classification | `append` | `fields` | `new_elem` | `zero` |
//! |----------------|----------|----------|------------|--------|
//! | Slice          | yes      |          | yes        | if writable |
//! | Map            |          |          | yes        | if writable |
//! | Struct         |          | yes      |            | if writable |
//! | Scalar, Other  |          |          |            | if writable |
//!
//! The table is fixed when the wrapper is built; unsupported operations fail
//! with [`SetError::Unsupported`] instead of being checked on every call.
//!
//! # Example
//!
//! ```rust
//! use setter::v;
//!
//! let mut port = 0u16;
//! v(&mut port).to(&"8080").unwrap();
//! assert_eq!(port, 8080);
//!
//! let mut hosts: Vec<String> = Vec::new();
//! v(&mut hosts).to(&"localhost").unwrap();
//! assert_eq!(hosts, vec!["localhost".to_string()]);
//! ```

mod capability;
mod field;
mod fill;

pub use field::Field;

use crate::coerce;
use crate::error::{Result, SetError};
use crate::reflect::{dynamic, resolve_mut, resolve_ref, Reflect, ReflectMut, ReflectRef, Settable};
use crate::types::{type_cache, Kind, TypeInfo, TypeKey};
use capability::Methods;
use std::fmt;
use std::sync::Arc;

/// Where a wrapper's value lives.
enum Slot<'a> {
    /// Absent, or a nil pointer that could not be allocated.
    Nil,
    /// Read-only, already resolved.
    Ref(&'a dyn Reflect),
    /// Writable, already resolved.
    Mut(&'a mut dyn Reflect),
    /// Fresh storage owned by the wrapper. Holds the declared type; resolved
    /// on access.
    Owned(Box<dyn Reflect>),
}

/// Capability-gated handle on one location.
pub struct Value<'a> {
    info: Arc<TypeInfo>,
    elem_info: Option<Arc<TypeInfo>>,
    top: Option<TypeKey>,
    can_write: bool,
    slot: Slot<'a>,
    methods: Methods,
}

impl<'a> Value<'a> {
    /// Wrap a writable location.
    ///
    /// Nil pointers on the way to the final value are allocated now, so
    /// wrapping `&mut None::<Box<T>>` leaves `Some(Box::new(T::zero()))`
    /// behind.
    pub fn new(target: &'a mut dyn Reflect) -> Self {
        let top = target.type_key();
        let info = type_cache().stat_type(top);
        Self::build(info, Some(top), true, Slot::Mut(resolve_mut(target)))
    }

    /// Wrap a location that must not be written.
    ///
    /// Every mutating operation fails with [`SetError::NotAssignable`].
    pub fn read_only(target: &'a dyn Reflect) -> Self {
        let top = target.type_key();
        let info = type_cache().stat_type(top);
        let slot = match resolve_ref(target) {
            Some(resolved) => Slot::Ref(resolved),
            None => Slot::Nil,
        };
        Self::build(info, Some(top), false, slot)
    }

    /// The absent wrapper; every operation reports [`SetError::NilReceiver`].
    pub fn nil() -> Self {
        Self {
            info: Arc::new(TypeInfo::default()),
            elem_info: None,
            top: None,
            can_write: false,
            slot: Slot::Nil,
            methods: Methods::UNSUPPORTED,
        }
    }

    fn build(info: Arc<TypeInfo>, top: Option<TypeKey>, can_write: bool, slot: Slot<'a>) -> Self {
        let elem_info = info.elem_type.map(|ty| type_cache().stat_type(ty));
        let methods = Methods::select(&info, can_write);
        Self {
            info,
            elem_info,
            top,
            can_write,
            slot,
            methods,
        }
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Descriptor of the resolved type.
    pub fn info(&self) -> &Arc<TypeInfo> {
        &self.info
    }

    /// Descriptor of the declared element type, for maps and slices.
    pub fn elem_info(&self) -> Option<&Arc<TypeInfo>> {
        self.elem_info.as_ref()
    }

    /// Declared type of the wrapped location, before pointer resolution.
    pub fn top_type(&self) -> Option<TypeKey> {
        self.top
    }

    pub fn can_write(&self) -> bool {
        self.can_write
    }

    /// Check if this is the absent wrapper.
    pub fn is_nil(&self) -> bool {
        self.top.is_none()
    }

    /// Current resolved value.
    pub fn get(&self) -> Option<&dyn Reflect> {
        match &self.slot {
            Slot::Nil => None,
            Slot::Ref(target) => Some(*target),
            Slot::Mut(target) => Some(&**target),
            Slot::Owned(boxed) => Some(peel(&**boxed)),
        }
    }

    /// Current resolved value as `T`.
    pub fn read<T: Settable>(&self) -> Option<&T> {
        dynamic(self.get()?).as_any().downcast_ref::<T>()
    }

    /// Take back storage created by [`Value::owned`] or [`Value::new_elem`].
    ///
    /// The box holds the declared type, with its pointer chain allocated.
    pub fn into_inner(self) -> Option<Box<dyn Reflect>> {
        match self.slot {
            Slot::Owned(boxed) => Some(boxed),
            _ => None,
        }
    }

    pub(crate) fn type_name(&self) -> &'static str {
        self.top.map_or("nil", |top| top.name())
    }

    pub(crate) fn is_struct_slice(&self) -> bool {
        self.info.is_slice() && self.elem_info.as_deref().is_some_and(TypeInfo::is_struct)
    }

    /// Mutable access to the resolved value.
    pub(crate) fn target_mut(&mut self) -> Result<&mut dyn Reflect> {
        let type_name = self.type_name();
        match &mut self.slot {
            Slot::Mut(target) => Ok(&mut **target),
            Slot::Owned(boxed) => Ok(resolve_mut(&mut **boxed)),
            Slot::Ref(_) | Slot::Nil => Err(SetError::NotAssignable { type_name }),
        }
    }

    // ========================================================================
    // Capabilities
    // ========================================================================

    /// Coerce every item into a new element and append them all.
    ///
    /// Atomic: the slice is extended only when every item converts.
    pub fn append(&mut self, items: &[&dyn Reflect]) -> Result<()> {
        if self.is_nil() {
            return Err(SetError::NilReceiver);
        }
        let append = self.methods.append;
        append(self, items)
    }

    /// Visible fields of a struct; empty for anything else.
    pub fn fields(&mut self) -> Vec<Field<'_>> {
        let fields = self.methods.fields;
        fields(self)
    }

    /// Visible fields carrying annotation `key`, with its value attached.
    pub fn fields_by_tag(&mut self, key: &str) -> Vec<Field<'_>> {
        let fields_by_tag = self.methods.fields_by_tag;
        fields_by_tag(self, key)
    }

    /// Fresh zero element of a map or slice, in its own storage.
    pub fn new_elem(&self) -> Result<Value<'static>> {
        if self.is_nil() {
            return Err(SetError::NilReceiver);
        }
        (self.methods.new_elem)(self)
    }

    /// Reset to the zero value of the resolved type.
    pub fn zero(&mut self) -> Result<()> {
        if self.is_nil() {
            return Err(SetError::NilReceiver);
        }
        let zero = self.methods.zero;
        zero(self)
    }

    /// Append an element built by [`Value::new_elem`] as-is.
    pub(crate) fn push_elem(&mut self, elem: Value<'static>) -> Result<()> {
        let type_name = self.type_name();
        let Some(boxed) = elem.into_inner() else {
            return Err(SetError::NilReceiver);
        };
        match self.target_mut()?.reflect_mut() {
            ReflectMut::List(list) => list.push_elem(boxed),
            _ => Err(SetError::unsupported("append", type_name)),
        }
    }

    // ========================================================================
    // Assignment
    // ========================================================================

    /// Assign `src`, converting as needed.
    ///
    /// The destination is zeroed first and is left at zero on any fault.
    ///
    /// - nil sources and sources of kind `Other` leave the zero value.
    /// - a source of the destination's declared type is cloned, except into
    ///   slices, which are always rebuilt element by element.
    /// - pointer sources are followed; a nil pointer leaves the zero value.
    /// - into a slice: a sequence is converted element-wise, anything else
    ///   becomes a one-element slice.
    /// - a sequence into a non-slice assigns its last element; an empty one
    ///   leaves the zero value.
    /// - otherwise scalars are converted (see the crate docs for the rules).
    pub fn to(&mut self, src: &dyn Reflect) -> Result<()> {
        if self.is_nil() {
            return Err(SetError::NilReceiver);
        }
        self.zero()?;

        let src = dynamic(src);
        let src_info = type_cache().stat(src);
        if src_info.is_nil() || src_info.kind == Kind::Other {
            return Ok(());
        }

        let into_slice = self.info.is_slice();
        if !into_slice && self.target_mut()?.assign_from(src) {
            return Ok(());
        }

        let Some(src) = resolve_ref(src) else {
            return Ok(());
        };

        if into_slice {
            let items: Vec<&dyn Reflect> = match src.reflect_ref() {
                ReflectRef::List(list) => (0..list.len()).filter_map(|i| list.elem(i)).collect(),
                _ => vec![src],
            };
            let append = self.methods.append;
            return append(self, &items);
        }

        if let ReflectRef::List(list) = src.reflect_ref() {
            return match list.len().checked_sub(1).and_then(|last| list.elem(last)) {
                Some(last) => self.to(last),
                None => Ok(()),
            };
        }

        let target = self.target_mut()?;
        if target.assign_from(src) {
            return Ok(());
        }
        coerce::coerce_into(target, src)
    }
}

impl Value<'static> {
    /// Wrap fresh storage owned by the wrapper.
    ///
    /// The pointer chain of the boxed value is allocated immediately.
    pub fn owned(mut value: Box<dyn Reflect>) -> Self {
        let top = (*value).type_key();
        let info = type_cache().stat_type(top);
        resolve_mut(&mut *value);
        Self::build(info, Some(top), true, Slot::Owned(value))
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("type", &self.type_name())
            .field("kind", &self.info.kind)
            .field("can_write", &self.can_write)
            .field("value", &self.get())
            .finish()
    }
}

/// Follow non-nil pointers without allocating.
fn peel(mut value: &dyn Reflect) -> &dyn Reflect {
    while let ReflectRef::Pointer(Some(next)) = value.reflect_ref() {
        value = next;
    }
    value
}
