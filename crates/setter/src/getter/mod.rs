// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Key/value sources that drive [`crate::Value::fill`].

#[cfg(feature = "json")]
mod json;

use crate::reflect::{Reflect, Settable};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// A source of values looked up by key.
///
/// Closures `Fn(&str) -> Got` and maps of [`Got`] are getters out of the box.
///
/// # Example
///
/// ```rust
/// use setter::{v, Got, Settable};
///
/// #[derive(Clone, Default, Settable)]
/// pub struct Config {
///     pub name: String,
///     pub retries: u8,
/// }
///
/// let mut config = Config::default();
/// v(&mut config)
///     .fill(&|key: &str| match key {
///         "name" => Got::value("api"),
///         "retries" => Got::value("3"),
///         _ => Got::Nil,
///     })
///     .unwrap();
/// assert_eq!(config.name, "api");
/// assert_eq!(config.retries, 3);
/// ```
pub trait Getter {
    /// Value stored under `key`; [`Got::Nil`] when there is none.
    fn get(&self, key: &str) -> Got;
}

/// What a [`Getter`] returns for one key.
#[derive(Clone)]
pub enum Got {
    /// Nothing; the destination is zeroed.
    Nil,
    /// A scalar, or a sequence of scalars.
    Value(Box<dyn Reflect>),
    /// A nested aggregate.
    Getter(Arc<dyn Getter>),
    /// A sequence of nested aggregates.
    Getters(Vec<Arc<dyn Getter>>),
}

impl Got {
    pub fn value<T: Settable>(value: T) -> Self {
        Self::Value(Box::new(value))
    }

    pub fn getter<G: Getter + 'static>(getter: G) -> Self {
        Self::Getter(Arc::new(getter))
    }

    pub fn getters<G: Getter + 'static>(getters: impl IntoIterator<Item = G>) -> Self {
        Self::Getters(
            getters
                .into_iter()
                .map(|g| Arc::new(g) as Arc<dyn Getter>)
                .collect(),
        )
    }

    /// Short name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Value(_) => "value",
            Self::Getter(_) => "getter",
            Self::Getters(_) => "getters",
        }
    }
}

impl fmt::Debug for Got {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("Nil"),
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Getter(_) => f.write_str("Getter(..)"),
            Self::Getters(list) => write!(f, "Getters(len={})", list.len()),
        }
    }
}

impl<F> Getter for F
where
    F: Fn(&str) -> Got,
{
    fn get(&self, key: &str) -> Got {
        self(key)
    }
}

impl Getter for HashMap<String, Got> {
    fn get(&self, key: &str) -> Got {
        HashMap::get(self, key).cloned().unwrap_or(Got::Nil)
    }
}

impl Getter for BTreeMap<String, Got> {
    fn get(&self, key: &str) -> Got {
        BTreeMap::get(self, key).cloned().unwrap_or(Got::Nil)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_getter_missing_key_is_nil() {
        let mut map = HashMap::new();
        map.insert("a".to_string(), Got::value(1i32));

        assert_eq!(Getter::get(&map, "a").kind(), "value");
        assert_eq!(Getter::get(&map, "b").kind(), "nil");
    }

    #[test]
    fn test_closure_getter() {
        let getter = |key: &str| Got::value(key.to_uppercase());
        match getter.get("abc") {
            Got::Value(value) => assert_eq!(
                (*value).as_any().downcast_ref::<String>().map(String::as_str),
                Some("ABC")
            ),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_getters_helper() {
        let rows = vec![BTreeMap::<String, Got>::new(), BTreeMap::new()];
        let got = Got::getters(rows);
        assert!(matches!(&got, Got::Getters(list) if list.len() == 2));
        assert_eq!(format!("{:?}", got), "Getters(len=2)");
    }
}
