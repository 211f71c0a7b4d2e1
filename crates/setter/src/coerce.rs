// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Scalar-to-scalar conversion.
//!
//! Rules:
//! - numeric to numeric narrows or widens with `as` semantics (silent
//!   truncation on overflow), except that negative values clamp to 0 when the
//!   destination is unsigned.
//! - float to integer truncates toward zero.
//! - `true`/`false` become 1/0; a nonzero number becomes `true`.
//! - strings are parsed: integer grammar first, float grammar as a fallback,
//!   so `"1.59"` into an integer yields 1.
//! - anything into `String` uses the plain textual form.

use crate::error::{Result, SetError};
use crate::reflect::{Reflect, ReflectMut, ReflectRef, ScalarMut, ScalarRef};

/// Widest representation of a numeric source.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Number {
    Int(i64),
    Uint(u64),
    Float(f64),
}

impl Number {
    fn is_nonzero(self) -> bool {
        match self {
            Number::Int(v) => v != 0,
            Number::Uint(v) => v != 0,
            Number::Float(v) => v != 0.0,
        }
    }
}

/// Conversion into one numeric destination type.
trait FromNumber: Sized {
    fn from_number(n: Number) -> Self;

    /// Parse text in the grammar preferred by the destination.
    fn parse_text(s: &str) -> Option<Number>;
}

macro_rules! impl_signed {
    ($($ty:ty),*) => {
        $(
            impl FromNumber for $ty {
                fn from_number(n: Number) -> Self {
                    match n {
                        Number::Int(v) => v as $ty,
                        Number::Uint(v) => v as $ty,
                        Number::Float(v) => (v as i64) as $ty,
                    }
                }

                fn parse_text(s: &str) -> Option<Number> {
                    s.parse::<i64>()
                        .map(Number::Int)
                        .or_else(|_| s.parse::<u64>().map(Number::Uint))
                        .or_else(|_| s.parse::<f64>().map(Number::Float))
                        .ok()
                }
            }
        )*
    };
}

macro_rules! impl_unsigned {
    ($($ty:ty),*) => {
        $(
            impl FromNumber for $ty {
                fn from_number(n: Number) -> Self {
                    match n {
                        Number::Int(v) if v < 0 => 0,
                        Number::Int(v) => v as $ty,
                        Number::Uint(v) => v as $ty,
                        Number::Float(v) if v < 0.0 => 0,
                        Number::Float(v) => (v as u64) as $ty,
                    }
                }

                fn parse_text(s: &str) -> Option<Number> {
                    s.parse::<u64>()
                        .map(Number::Uint)
                        .or_else(|_| s.parse::<i64>().map(Number::Int))
                        .or_else(|_| s.parse::<f64>().map(Number::Float))
                        .ok()
                }
            }
        )*
    };
}

macro_rules! impl_float {
    ($($ty:ty),*) => {
        $(
            impl FromNumber for $ty {
                fn from_number(n: Number) -> Self {
                    match n {
                        Number::Int(v) => v as $ty,
                        Number::Uint(v) => v as $ty,
                        Number::Float(v) => v as $ty,
                    }
                }

                fn parse_text(s: &str) -> Option<Number> {
                    s.parse::<f64>().map(Number::Float).ok()
                }
            }
        )*
    };
}

impl_signed!(i8, i16, i32, i64, isize);
impl_unsigned!(u8, u16, u32, u64, usize);
impl_float!(f32, f64);

/// Numeric reading of a non-string scalar.
fn numeric(src: ScalarRef<'_>) -> Option<Number> {
    let n = match src {
        ScalarRef::Bool(v) => Number::Int(i64::from(v)),
        ScalarRef::I8(v) => Number::Int(v as i64),
        ScalarRef::I16(v) => Number::Int(v as i64),
        ScalarRef::I32(v) => Number::Int(v as i64),
        ScalarRef::I64(v) => Number::Int(v),
        ScalarRef::Isize(v) => Number::Int(v as i64),
        ScalarRef::U8(v) => Number::Uint(v as u64),
        ScalarRef::U16(v) => Number::Uint(v as u64),
        ScalarRef::U32(v) => Number::Uint(v as u64),
        ScalarRef::U64(v) => Number::Uint(v),
        ScalarRef::Usize(v) => Number::Uint(v as u64),
        ScalarRef::F32(v) => Number::Float(v as f64),
        ScalarRef::F64(v) => Number::Float(v),
        ScalarRef::String(_) => return None,
    };
    Some(n)
}

/// Text as it appears in a coercion fault: strings quoted, the rest plain.
fn describe(src: ScalarRef<'_>) -> String {
    match src {
        ScalarRef::String(s) => format!("{:?}", s),
        other => other.to_string(),
    }
}

/// Boolean grammar: `1 t T TRUE true True` and `0 f F FALSE false False`.
fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn assign_number<T: FromNumber>(slot: &mut T, src: ScalarRef<'_>, target: &'static str) -> Result<()> {
    let number = match src {
        ScalarRef::String(s) => T::parse_text(s),
        _ => numeric(src),
    };
    let number = number.ok_or_else(|| SetError::coercion(describe(src), target))?;
    *slot = T::from_number(number);
    Ok(())
}

/// Convert `src` into the scalar slot `dst`.
pub(crate) fn assign_scalar(dst: ScalarMut<'_>, src: ScalarRef<'_>) -> Result<()> {
    let target = dst.kind().name();
    match dst {
        ScalarMut::Bool(slot) => {
            *slot = match src {
                ScalarRef::Bool(v) => v,
                ScalarRef::String(s) => parse_bool(s)
                    .or_else(|| s.parse::<f64>().ok().map(|f| f != 0.0))
                    .ok_or_else(|| SetError::coercion(describe(src), target))?,
                _ => numeric(src).is_some_and(Number::is_nonzero),
            };
            Ok(())
        }
        ScalarMut::I8(slot) => assign_number(slot, src, target),
        ScalarMut::I16(slot) => assign_number(slot, src, target),
        ScalarMut::I32(slot) => assign_number(slot, src, target),
        ScalarMut::I64(slot) => assign_number(slot, src, target),
        ScalarMut::Isize(slot) => assign_number(slot, src, target),
        ScalarMut::U8(slot) => assign_number(slot, src, target),
        ScalarMut::U16(slot) => assign_number(slot, src, target),
        ScalarMut::U32(slot) => assign_number(slot, src, target),
        ScalarMut::U64(slot) => assign_number(slot, src, target),
        ScalarMut::Usize(slot) => assign_number(slot, src, target),
        ScalarMut::F32(slot) => assign_number(slot, src, target),
        ScalarMut::F64(slot) => assign_number(slot, src, target),
        ScalarMut::String(slot) => {
            *slot = src.to_string();
            Ok(())
        }
    }
}

/// Convert a resolved source into a resolved destination.
///
/// Only scalar pairs convert; every other combination is a coercion fault
/// naming the source and destination types.
pub(crate) fn coerce_into(dst: &mut dyn Reflect, src: &dyn Reflect) -> Result<()> {
    let target = dst.type_key().name();
    match (dst.reflect_mut(), src.reflect_ref()) {
        (ReflectMut::Scalar(slot), ReflectRef::Scalar(value)) => assign_scalar(slot, value),
        _ => Err(SetError::coercion(src.type_key().name(), target)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coerce<T: crate::Settable>(src: &dyn Reflect) -> Result<T> {
        let mut dst = T::zero();
        coerce_into(&mut dst, src)?;
        Ok(dst)
    }

    #[test]
    fn test_numeric_narrowing_truncates() {
        assert_eq!(coerce::<u8>(&999_999i32).unwrap(), 63);
        assert_eq!(coerce::<i8>(&200u16).unwrap(), -56);
        assert_eq!(coerce::<i16>(&70_000.9f64).unwrap(), 4464);
        assert_eq!(coerce::<u32>(&-1i64).unwrap(), 0);
        assert_eq!(coerce::<u64>(&-1.59f32).unwrap(), 0);
        assert_eq!(coerce::<f32>(&3u8).unwrap(), 3.0);
    }

    #[test]
    fn test_text_into_integers() {
        assert_eq!(coerce::<i32>(&"1.59").unwrap(), 1);
        assert_eq!(coerce::<i32>(&"-3.14").unwrap(), -3);
        assert_eq!(coerce::<u32>(&"-3.14").unwrap(), 0);
        assert_eq!(coerce::<u32>(&"-1").unwrap(), 0);
        assert_eq!(coerce::<u8>(&"255").unwrap(), 255);
        assert_eq!(coerce::<u64>(&"18446744073709551615").unwrap(), u64::MAX);
        assert_eq!(coerce::<i64>(&"+12").unwrap(), 12);
    }

    #[test]
    fn test_text_beyond_i64_wraps_like_integers() {
        assert_eq!(coerce::<i64>(&"18446744073709551615").unwrap(), -1);
        assert_eq!(coerce::<i64>(&u64::MAX).unwrap(), -1);
        assert_eq!(coerce::<i32>(&"9223372036854775808").unwrap(), 0);
        assert_eq!(coerce::<i64>(&"9223372036854775808").unwrap(), i64::MIN);
    }

    #[test]
    fn test_bool_conversions() {
        assert_eq!(coerce::<i16>(&true).unwrap(), 1);
        assert_eq!(coerce::<f64>(&false).unwrap(), 0.0);
        assert!(coerce::<bool>(&-7i32).unwrap());
        assert!(!coerce::<bool>(&0.0f32).unwrap());
        assert!(coerce::<bool>(&"T").unwrap());
        assert!(!coerce::<bool>(&"False").unwrap());
        assert!(coerce::<bool>(&"2.5").unwrap());
        assert!(coerce::<bool>(&"yes").is_err());
    }

    #[test]
    fn test_into_string() {
        assert_eq!(coerce::<String>(&true).unwrap(), "true");
        assert_eq!(coerce::<String>(&-42i64).unwrap(), "-42");
        assert_eq!(coerce::<String>(&0.1f32).unwrap(), "0.1");
        assert_eq!(coerce::<String>(&"same").unwrap(), "same");
    }

    #[test]
    fn test_faults_name_value_and_target() {
        let err = coerce::<u16>(&"twelve").unwrap_err();
        assert!(matches!(
            &err,
            SetError::Coercion { value, target: "u16" } if value == "\"twelve\""
        ));

        let err = coerce::<f32>(&vec![1u8]).unwrap_err();
        assert!(matches!(err, SetError::Coercion { target: "f32", .. }));

        // Literals are never destinations
        let err = coerce::<&'static str>(&1i32).unwrap_err();
        assert!(matches!(err, SetError::Coercion { value, .. } if value == "i32"));
    }

    #[test]
    fn test_random_integers_round_trip_through_text() {
        for _ in 0..256 {
            let n = fastrand::i64(..);
            let text = coerce::<String>(&n).unwrap();
            assert_eq!(coerce::<i64>(&text).unwrap(), n);
        }
    }
}
