// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error type shared by every fallible operation.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, SetError>;

/// Errors returned by value wrapper operations.
///
/// Composite operations (`to` on a sequence, `fill` over many fields) wrap the
/// first fault they hit in [`SetError::Element`] or [`SetError::Field`] so the
/// offending location can be identified. Use [`SetError::root`] to get at the
/// underlying fault kind.
///
/// # Example
///
/// ```rust
/// use setter::{v, SetError};
///
/// let mut n = 0u16;
/// match v(&mut n).to(&"twelve") {
///     Err(SetError::Coercion { target, .. }) => assert_eq!(target, "u16"),
///     other => panic!("unexpected: {:?}", other),
/// }
/// ```
#[derive(Debug, Error)]
pub enum SetError {
    // ========================================================================
    // Receiver Errors
    // ========================================================================
    /// Operation invoked on a wrapper that is bound to no location.
    #[error("nil receiver")]
    NilReceiver,
    /// Mutating operation attempted on a wrapper that cannot write.
    #[error("value of type {type_name} is not assignable; wrap a mutable reference")]
    NotAssignable { type_name: &'static str },
    /// Capability not offered for the wrapped type's classification.
    #[error("{op} is unsupported for type {type_name}")]
    Unsupported {
        op: &'static str,
        type_name: &'static str,
    },

    // ========================================================================
    // Conversion Errors
    // ========================================================================
    /// A value could not be converted into the destination scalar type.
    #[error("cannot coerce {value} into {target}")]
    Coercion { value: String, target: &'static str },
    /// Getter result shape is incompatible with the destination field.
    #[error("getter returned {got} for key {key:?} and field {field} is not fillable")]
    ShapeMismatch {
        key: String,
        field: &'static str,
        got: &'static str,
    },
    /// A built element did not match the container's element type.
    #[error("element type mismatch: expected {expected}, got {got}")]
    ElementType {
        expected: &'static str,
        got: &'static str,
    },

    // ========================================================================
    // Navigation Errors
    // ========================================================================
    /// Positional field access past the end of a struct.
    #[error("index {index} out of range for {type_name} with {len} fields")]
    IndexOutOfRange {
        index: usize,
        len: usize,
        type_name: &'static str,
    },
    /// Empty path, or descent requested through a non-struct.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    // ========================================================================
    // Context
    // ========================================================================
    /// Fault raised while assigning a struct field.
    #[error("field {field}: {source}")]
    Field {
        field: &'static str,
        source: Box<SetError>,
    },
    /// Fault raised while assigning a sequence element.
    #[error("element {index}: {source}")]
    Element {
        index: usize,
        source: Box<SetError>,
    },
}

impl SetError {
    pub(crate) fn coercion(value: impl Into<String>, target: &'static str) -> Self {
        Self::Coercion {
            value: value.into(),
            target,
        }
    }

    pub(crate) fn unsupported(op: &'static str, type_name: &'static str) -> Self {
        Self::Unsupported { op, type_name }
    }

    pub(crate) fn in_field(self, field: &'static str) -> Self {
        Self::Field {
            field,
            source: Box::new(self),
        }
    }

    pub(crate) fn in_element(self, index: usize) -> Self {
        Self::Element {
            index,
            source: Box::new(self),
        }
    }

    /// Innermost fault, with field/element context peeled off.
    pub fn root(&self) -> &SetError {
        let mut err = self;
        while let Self::Field { source, .. } | Self::Element { source, .. } = err {
            err = &**source;
        }
        err
    }

    /// Field names leading to the fault, outermost first.
    pub fn field_path(&self) -> Vec<&'static str> {
        let mut path = Vec::new();
        let mut err = self;
        loop {
            match err {
                Self::Field { field, source } => {
                    path.push(*field);
                    err = &**source;
                }
                Self::Element { source, .. } => err = &**source,
                _ => return path,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_peels_context() {
        let err = SetError::coercion("\"x\"", "i32")
            .in_element(2)
            .in_field("scores")
            .in_field("player");

        assert!(matches!(err.root(), SetError::Coercion { target: "i32", .. }));
        assert_eq!(err.field_path(), vec!["player", "scores"]);
        assert_eq!(
            err.to_string(),
            "field player: field scores: element 2: cannot coerce \"x\" into i32"
        );
    }

    #[test]
    fn test_root_of_plain_error_is_itself() {
        let err = SetError::NilReceiver;
        assert!(matches!(err.root(), SetError::NilReceiver));
        assert!(err.field_path().is_empty());
    }
}
