// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # setter - runtime value assignment
//!
//! Assign, convert and populate values whose shape is only known at run
//! time: scalars, slices, maps, structs and any chain of `Option`/`Box`
//! around them.
//!
//! ## Quick Start
//!
//! ```rust
//! use setter::{v, Got, Settable};
//! use std::collections::HashMap;
//!
//! #[derive(Clone, Default, Settable)]
//! pub struct Server {
//!     pub host: String,
//!     #[tag(env = "PORT")]
//!     pub port: u16,
//!     pub aliases: Vec<String>,
//!     pub timeout: Option<Box<f64>>,
//! }
//!
//! let mut source: HashMap<String, Got> = HashMap::new();
//! source.insert("host".into(), Got::value("example.org"));
//! source.insert("port".into(), Got::value("8443"));
//! source.insert("aliases".into(), Got::value("www"));
//! source.insert("timeout".into(), Got::value(2.5f32));
//!
//! let mut server = Server::default();
//! v(&mut server).fill(&source).unwrap();
//!
//! assert_eq!(server.host, "example.org");
//! assert_eq!(server.port, 8443);
//! assert_eq!(server.aliases, vec!["www".to_string()]);
//! assert_eq!(server.timeout, Some(Box::new(2.5)));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------+
//! |  Fill / FillByTag          (getter-driven struct population)  |
//! +---------------------------------------------------------------+
//! |  Value                     (capability table, to(), append)   |
//! +------------------------------+--------------------------------+
//! |  TypeInfoCache (DashMap)     |  coercion (scalar -> scalar)   |
//! +------------------------------+--------------------------------+
//! |  Settable / Reflect          (built-in impls + derive)        |
//! +---------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Value`] | Handle on one location, exposing the supported operations |
//! | [`TypeInfo`] | Cached classification, element type and fields of a type |
//! | [`TypeInfoCache`] | Concurrent memo of [`TypeInfo`] per declared type |
//! | [`Getter`] | Key/value source for [`Value::fill`] |
//! | [`SetError`] | Every fault an operation can report |
//!
//! ## Conversions
//!
//! Numeric narrowing truncates silently (`999999` into `u8` is 63).
//! Negative values into unsigned destinations become 0. Floats truncate
//! toward zero. Strings are parsed, integer grammar first and float grammar
//! second, so `"1.59"` into any integer is 1. Booleans convert to and from
//! 1/0.
//!
//! ## Features
//!
//! - `derive` (default): `#[derive(Settable)]` for structs.
//! - `json` (default): `serde_json::Value` and `serde_json::Map` as getters.

// Allow the derive macro to work inside this crate's tests
extern crate self as setter;

mod coerce;
/// Error type and result alias.
pub mod error;
/// Key/value sources for struct population.
pub mod getter;
/// Runtime view of typed values (`Settable`, `Reflect`).
pub mod reflect;
/// Type descriptors and the classification cache.
pub mod types;
/// The capability-gated value wrapper.
pub mod value;

pub use error::{Result, SetError};
pub use getter::{Getter, Got};
pub use reflect::{
    dynamic, resolve_mut, resolve_ref, List, Reflect, ReflectMut, ReflectRef, ScalarMut,
    ScalarRef, Settable, Struct,
};
pub use types::{
    type_cache, FieldInfo, Kind, ScalarKind, Shape, Tags, TypeInfo, TypeInfoCache, TypeKey,
};
pub use value::{Field, Value};

// Derive macro (for #[derive(setter::Settable)])
#[cfg(feature = "derive")]
pub use setter_codegen::Settable;

/// Wrap a writable location.
///
/// Shorthand for [`Value::new`].
pub fn v<T: Settable>(target: &mut T) -> Value<'_> {
    Value::new(target)
}
