// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors for runtime type information.

use crate::reflect::{Reflect, Settable};
use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Scalar type kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    String,
}

impl ScalarKind {
    /// Rust spelling of the kind, used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::String => "String",
        }
    }
}

/// Coarse structural category of a resolved type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Kind {
    Scalar,
    Map,
    Slice,
    Struct,
    /// Untyped nil, dynamic boxes, and anything the engine cannot operate on.
    #[default]
    Other,
}

/// Raw, unresolved shape of one type as reported by [`Settable::shape`].
///
/// Pointers are not followed here; the cache does that when it builds a
/// [`TypeInfo`].
#[derive(Debug, Clone)]
pub enum Shape {
    /// One of the closed set of scalar types.
    Scalar(ScalarKind),
    /// Growable sequence.
    Slice { elem: TypeKey },
    /// Keyed container.
    Map { key: TypeKey, elem: TypeKey },
    /// Aggregate with visible fields in declaration order.
    Struct { fields: Vec<FieldInfo> },
    /// One level of indirection (`Option<T>`, `Box<T>`).
    Pointer { pointee: TypeKey },
    /// `Box<dyn Reflect>`: the concrete type is only known per value.
    Interface,
    /// Untyped nil (`()`).
    Nil,
    /// Anything else.
    Opaque,
}

/// Identity of a [`Settable`] type.
///
/// Compares and hashes by `TypeId`; also carries what is needed to describe
/// the type and to allocate a fresh zero value of it.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
    shape: fn() -> Shape,
    new: fn() -> Box<dyn Reflect>,
}

impl TypeKey {
    /// Key for `T`.
    pub fn of<T: Settable>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            shape: T::shape,
            new: new_zeroed::<T>,
        }
    }

    /// Underlying `TypeId`.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Full type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Raw shape of the type.
    pub fn shape(&self) -> Shape {
        (self.shape)()
    }

    /// Allocate a zero value of the type.
    pub fn new_zeroed(&self) -> Box<dyn Reflect> {
        (self.new)()
    }
}

fn new_zeroed<T: Settable>() -> Box<dyn Reflect> {
    Box::new(T::zero())
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Read-only `key = "value"` annotations attached to a struct field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tags(&'static [(&'static str, &'static str)]);

impl Tags {
    /// Wrap a static annotation table.
    pub const fn new(pairs: &'static [(&'static str, &'static str)]) -> Self {
        Self(pairs)
    }

    /// Value stored under `key`, if present.
    pub fn lookup(&self, key: &str) -> Option<&'static str> {
        self.0.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    /// Iterate pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> {
        self.0.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Field descriptor for visible struct members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    /// Field name.
    pub name: &'static str,
    /// Declared field type (not pointer-resolved).
    pub ty: TypeKey,
    /// Annotations.
    pub tags: Tags,
    /// Index among visible fields; the index accepted by [`crate::Struct`].
    pub index: usize,
    /// Position among all declared fields, hidden ones included.
    pub position: usize,
}

impl FieldInfo {
    /// Create a new field descriptor.
    pub fn new(name: &'static str, ty: TypeKey, index: usize, position: usize) -> Self {
        Self {
            name,
            ty,
            tags: Tags::default(),
            index,
            position,
        }
    }

    /// Attach annotations.
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }
}

/// Resolved, immutable summary of one type.
///
/// Built once per declared type by [`crate::TypeInfoCache`] and shared behind
/// an `Arc` by every wrapper of that type. When the declared type is a pointer
/// chain, everything here describes the type at the end of the chain.
#[derive(Debug, Clone, Default)]
pub struct TypeInfo {
    /// Classification.
    pub kind: Kind,
    /// Scalar kind, present iff `kind == Kind::Scalar`.
    pub scalar: Option<ScalarKind>,
    /// Type at the end of the pointer chain; `None` for untyped nil.
    pub ty: Option<TypeKey>,
    /// Declared element type, present iff the kind is `Map` or `Slice`.
    pub elem_type: Option<TypeKey>,
    /// Visible fields, non-empty only for `Struct`.
    pub fields: Vec<FieldInfo>,
}

impl TypeInfo {
    /// Build from the shape found at the end of a pointer chain.
    pub(crate) fn from_shape(resolved: TypeKey, shape: Shape) -> Self {
        let mut info = Self {
            ty: Some(resolved),
            ..Self::default()
        };
        match shape {
            Shape::Scalar(kind) => {
                info.kind = Kind::Scalar;
                info.scalar = Some(kind);
            }
            Shape::Slice { elem } => {
                info.kind = Kind::Slice;
                info.elem_type = Some(elem);
            }
            Shape::Map { elem, .. } => {
                info.kind = Kind::Map;
                info.elem_type = Some(elem);
            }
            Shape::Struct { fields } => {
                info.kind = Kind::Struct;
                info.fields = fields;
            }
            Shape::Nil => return Self::default(),
            Shape::Pointer { .. } | Shape::Interface | Shape::Opaque => {}
        }
        info
    }

    pub fn is_scalar(&self) -> bool {
        self.kind == Kind::Scalar
    }

    pub fn is_map(&self) -> bool {
        self.kind == Kind::Map
    }

    pub fn is_slice(&self) -> bool {
        self.kind == Kind::Slice
    }

    pub fn is_struct(&self) -> bool {
        self.kind == Kind::Struct
    }

    /// Check if this describes untyped nil.
    pub fn is_nil(&self) -> bool {
        self.ty.is_none()
    }

    /// Name of the resolved type, `"nil"` for untyped nil.
    pub fn type_name(&self) -> &'static str {
        self.ty.map_or("nil", |ty| ty.name())
    }

    /// Get field by name.
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|f| f.name == name)
    }
}
