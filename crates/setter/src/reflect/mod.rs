// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime view of typed values.
//!
//! Rust has no built-in reflection, so every type the engine can touch
//! describes itself through two traits:
//!
//! - [`Settable`]: the static side. Implemented once per type (built in for
//!   scalars, containers and pointers; `#[derive(Settable)]` for structs).
//! - [`Reflect`]: the object-safe dynamic side, blanket-implemented for every
//!   `Settable`. The engine only ever works on `&dyn Reflect` and
//!   `&mut dyn Reflect`.
//!
//! # Indirection
//!
//! `Option<T>` and `Box<T>` are pointers: [`ReflectRef::Pointer`] exposes the
//! pointee, and [`Reflect::deref_alloc`] steps through one level, allocating
//! `Some(T::zero())` when the option is `None`. `Box<dyn Reflect>` is the
//! dynamic "interface" type and is looked through by [`dynamic`].

mod impls;
mod scalar;

pub use scalar::{ScalarMut, ScalarRef};

use crate::error::Result;
use crate::types::{Shape, TypeKey};
use std::any::Any;
use std::fmt;

/// Static description and structural access for one type.
///
/// # Example
///
/// ```rust
/// use setter::{ReflectMut, ReflectRef, Settable, Shape};
///
/// #[derive(Clone)]
/// struct Opaque(u32);
///
/// impl Settable for Opaque {
///     fn shape() -> Shape {
///         Shape::Opaque
///     }
///     fn zero() -> Self {
///         Opaque(0)
///     }
///     fn view(&self) -> ReflectRef<'_> {
///         ReflectRef::Opaque
///     }
///     fn view_mut(&mut self) -> ReflectMut<'_> {
///         ReflectMut::Other
///     }
/// }
/// ```
pub trait Settable: Clone + Send + Sync + 'static {
    /// Raw shape of the type, pointers unresolved.
    fn shape() -> Shape;

    /// Zero value of the type.
    fn zero() -> Self;

    /// Structural read access.
    fn view(&self) -> ReflectRef<'_>;

    /// Structural write access.
    fn view_mut(&mut self) -> ReflectMut<'_>;

    /// Step through one level of indirection, allocating a nil pointee.
    ///
    /// Non-pointer types return themselves.
    fn pointee_alloc(&mut self) -> &mut dyn Reflect {
        self
    }

    /// Assign `src` when it has exactly this type.
    fn try_assign(&mut self, src: &dyn Reflect) -> bool {
        match src.as_any().downcast_ref::<Self>() {
            Some(value) => {
                self.clone_from(value);
                true
            }
            None => false,
        }
    }
}

/// Object-safe counterpart of [`Settable`].
///
/// Implemented for every `Settable` type; do not implement it by hand.
///
/// Method calls on a `Box<dyn Reflect>` binding resolve to the box itself
/// (which is `Reflect` too). Dereference first (`(*boxed).type_key()`) to
/// reach the boxed value.
pub trait Reflect: Send + Sync + 'static {
    /// Identity of the concrete type.
    fn type_key(&self) -> TypeKey;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// Clone into fresh storage.
    fn clone_boxed(&self) -> Box<dyn Reflect>;

    fn reflect_ref(&self) -> ReflectRef<'_>;

    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// See [`Settable::pointee_alloc`].
    fn deref_alloc(&mut self) -> &mut dyn Reflect;

    /// Overwrite with the zero value of the type.
    fn set_zero(&mut self);

    /// See [`Settable::try_assign`].
    fn assign_from(&mut self, src: &dyn Reflect) -> bool;

    /// Check if this value is one level of indirection.
    fn is_pointer(&self) -> bool {
        matches!(self.reflect_ref(), ReflectRef::Pointer(_))
    }
}

impl<T: Settable> Reflect for T {
    fn type_key(&self) -> TypeKey {
        TypeKey::of::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn clone_boxed(&self) -> Box<dyn Reflect> {
        Box::new(self.clone())
    }

    fn reflect_ref(&self) -> ReflectRef<'_> {
        self.view()
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        self.view_mut()
    }

    fn deref_alloc(&mut self) -> &mut dyn Reflect {
        self.pointee_alloc()
    }

    fn set_zero(&mut self) {
        *self = T::zero();
    }

    fn assign_from(&mut self, src: &dyn Reflect) -> bool {
        self.try_assign(src)
    }
}

impl Clone for Box<dyn Reflect> {
    fn clone(&self) -> Self {
        (**self).clone_boxed()
    }
}

impl fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reflect_ref() {
            ReflectRef::Scalar(scalar) => write!(f, "{:?}", scalar),
            ReflectRef::List(list) => f
                .debug_list()
                .entries((0..list.len()).filter_map(|i| list.elem(i)))
                .finish(),
            ReflectRef::Pointer(Some(pointee)) => f.debug_tuple("Some").field(&pointee).finish(),
            ReflectRef::Pointer(None) | ReflectRef::Nil => f.write_str("nil"),
            ReflectRef::Interface(inner) => fmt::Debug::fmt(inner, f),
            ReflectRef::Map | ReflectRef::Struct(_) | ReflectRef::Opaque => {
                f.write_str(self.type_key().name())
            }
        }
    }
}

/// Shared structural view returned by [`Reflect::reflect_ref`].
#[derive(Clone, Copy)]
pub enum ReflectRef<'a> {
    Scalar(ScalarRef<'a>),
    List(&'a dyn List),
    Map,
    Struct(&'a dyn Struct),
    /// `None` for a nil pointer.
    Pointer(Option<&'a dyn Reflect>),
    /// Contents of a `Box<dyn Reflect>`.
    Interface(&'a dyn Reflect),
    /// Untyped nil.
    Nil,
    Opaque,
}

/// Mutable structural view returned by [`Reflect::reflect_mut`].
pub enum ReflectMut<'a> {
    Scalar(ScalarMut<'a>),
    List(&'a mut dyn List),
    Struct(&'a mut dyn Struct),
    /// Maps, pointers and anything that is only written as a whole.
    Other,
}

/// Growable sequence of elements of one declared type.
pub trait List: Send + Sync {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index`.
    fn elem(&self, index: usize) -> Option<&dyn Reflect>;

    /// Append an owned element.
    ///
    /// Fails with [`crate::SetError::ElementType`] when `value` is not of the
    /// declared element type.
    fn push_elem(&mut self, value: Box<dyn Reflect>) -> Result<()>;
}

/// Aggregate with visible fields addressed by visible-field index.
///
/// Generated by `#[derive(Settable)]`.
pub trait Struct: Send + Sync {
    fn field(&self, index: usize) -> Option<&dyn Reflect>;

    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Mutable access to every visible field at once, in declaration order.
    fn fields_mut(&mut self) -> Vec<&mut dyn Reflect>;

    fn field_count(&self) -> usize;
}

/// Look through `Box<dyn Reflect>` layers to the concrete value.
pub fn dynamic(mut value: &dyn Reflect) -> &dyn Reflect {
    while let ReflectRef::Interface(inner) = value.reflect_ref() {
        value = inner;
    }
    value
}

/// Follow pointers and dynamic boxes to the final value.
///
/// Returns `None` when the chain ends in a nil pointer. Never allocates.
pub fn resolve_ref(mut value: &dyn Reflect) -> Option<&dyn Reflect> {
    loop {
        match value.reflect_ref() {
            ReflectRef::Pointer(Some(next)) | ReflectRef::Interface(next) => value = next,
            ReflectRef::Pointer(None) => return None,
            _ => return Some(value),
        }
    }
}

/// Follow pointers to the final value, allocating every nil pointer passed.
///
/// This is the one place a pointer chain is mutated: `None` becomes
/// `Some(T::zero())` at each level.
pub fn resolve_mut(mut value: &mut dyn Reflect) -> &mut dyn Reflect {
    while value.is_pointer() {
        value = value.deref_alloc();
    }
    value
}

#[cfg(test)]
mod tests;
