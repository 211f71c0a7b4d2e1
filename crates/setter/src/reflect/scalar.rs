// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Scalar views and the built-in scalar implementations.

use super::{ReflectMut, ReflectRef, Settable};
use crate::types::{ScalarKind, Shape};
use std::fmt;

/// Borrowed scalar value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarRef<'a> {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    F32(f32),
    F64(f64),
    String(&'a str),
}

impl ScalarRef<'_> {
    pub fn kind(&self) -> ScalarKind {
        match self {
            Self::Bool(_) => ScalarKind::Bool,
            Self::I8(_) => ScalarKind::I8,
            Self::I16(_) => ScalarKind::I16,
            Self::I32(_) => ScalarKind::I32,
            Self::I64(_) => ScalarKind::I64,
            Self::Isize(_) => ScalarKind::Isize,
            Self::U8(_) => ScalarKind::U8,
            Self::U16(_) => ScalarKind::U16,
            Self::U32(_) => ScalarKind::U32,
            Self::U64(_) => ScalarKind::U64,
            Self::Usize(_) => ScalarKind::Usize,
            Self::F32(_) => ScalarKind::F32,
            Self::F64(_) => ScalarKind::F64,
            Self::String(_) => ScalarKind::String,
        }
    }
}

/// Plain textual form: numbers and booleans as Rust prints them, strings as-is.
impl fmt::Display for ScalarRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => fmt::Display::fmt(v, f),
            Self::I8(v) => fmt::Display::fmt(v, f),
            Self::I16(v) => fmt::Display::fmt(v, f),
            Self::I32(v) => fmt::Display::fmt(v, f),
            Self::I64(v) => fmt::Display::fmt(v, f),
            Self::Isize(v) => fmt::Display::fmt(v, f),
            Self::U8(v) => fmt::Display::fmt(v, f),
            Self::U16(v) => fmt::Display::fmt(v, f),
            Self::U32(v) => fmt::Display::fmt(v, f),
            Self::U64(v) => fmt::Display::fmt(v, f),
            Self::Usize(v) => fmt::Display::fmt(v, f),
            Self::F32(v) => fmt::Display::fmt(v, f),
            Self::F64(v) => fmt::Display::fmt(v, f),
            Self::String(v) => f.write_str(v),
        }
    }
}

/// Mutable scalar slot.
#[derive(Debug)]
pub enum ScalarMut<'a> {
    Bool(&'a mut bool),
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    Isize(&'a mut isize),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    Usize(&'a mut usize),
    F32(&'a mut f32),
    F64(&'a mut f64),
    String(&'a mut String),
}

impl ScalarMut<'_> {
    pub fn kind(&self) -> ScalarKind {
        match self {
            Self::Bool(_) => ScalarKind::Bool,
            Self::I8(_) => ScalarKind::I8,
            Self::I16(_) => ScalarKind::I16,
            Self::I32(_) => ScalarKind::I32,
            Self::I64(_) => ScalarKind::I64,
            Self::Isize(_) => ScalarKind::Isize,
            Self::U8(_) => ScalarKind::U8,
            Self::U16(_) => ScalarKind::U16,
            Self::U32(_) => ScalarKind::U32,
            Self::U64(_) => ScalarKind::U64,
            Self::Usize(_) => ScalarKind::Usize,
            Self::F32(_) => ScalarKind::F32,
            Self::F64(_) => ScalarKind::F64,
            Self::String(_) => ScalarKind::String,
        }
    }
}

macro_rules! impl_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Settable for $ty {
                fn shape() -> Shape {
                    Shape::Scalar(ScalarKind::$variant)
                }

                fn zero() -> Self {
                    <$ty>::default()
                }

                fn view(&self) -> ReflectRef<'_> {
                    ReflectRef::Scalar(ScalarRef::$variant(*self))
                }

                fn view_mut(&mut self) -> ReflectMut<'_> {
                    ReflectMut::Scalar(ScalarMut::$variant(self))
                }
            }
        )*
    };
}

impl_scalar! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
}

impl Settable for String {
    fn shape() -> Shape {
        Shape::Scalar(ScalarKind::String)
    }

    fn zero() -> Self {
        String::new()
    }

    fn view(&self) -> ReflectRef<'_> {
        ReflectRef::Scalar(ScalarRef::String(self.as_str()))
    }

    fn view_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Scalar(ScalarMut::String(self))
    }
}

/// String literals are sources only; nothing is ever coerced into one.
impl Settable for &'static str {
    fn shape() -> Shape {
        Shape::Scalar(ScalarKind::String)
    }

    fn zero() -> Self {
        ""
    }

    fn view(&self) -> ReflectRef<'_> {
        ReflectRef::Scalar(ScalarRef::String(self))
    }

    fn view_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Other
    }
}
