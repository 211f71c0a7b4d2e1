// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Process-wide memoized store of [`TypeInfo`] descriptors.

use crate::reflect::{dynamic, Reflect};
use crate::types::{Shape, TypeInfo, TypeKey};
use dashmap::DashMap;
use std::any::TypeId;
use std::sync::{Arc, OnceLock};

/// Cache of [`TypeInfo`] keyed by the *declared* type.
///
/// Asking for a pointer type (`Option<Box<T>>`) yields the descriptor of the
/// type at the end of the chain (`T`), but the entry is stored under the
/// pointer type so the next lookup of the same declared type is a single map
/// hit.
///
/// Populated on first use, never evicted: types are static for the lifetime
/// of the process.
///
/// # Concurrency
///
/// `DashMap` shards the map internally, so lookups and first-time inserts
/// from many threads proceed without a global lock. Two threads racing on the
/// same key may both build a descriptor; only the first insert wins and both
/// get the winning `Arc`. A descriptor is fully built before it is published.
#[derive(Debug, Default)]
pub struct TypeInfoCache {
    cache: DashMap<TypeId, Arc<TypeInfo>>,
}

impl TypeInfoCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            cache: DashMap::new(),
        }
    }

    /// Describe the concrete type of `value`.
    ///
    /// Boxed trait objects are looked through, so a `Box<dyn Reflect>`
    /// holding an `i32` is described as `i32`. Untyped nil (`()`) yields the
    /// empty descriptor.
    pub fn stat(&self, value: &dyn Reflect) -> Arc<TypeInfo> {
        self.stat_type(dynamic(value).type_key())
    }

    /// Describe the type identified by `key`.
    pub fn stat_type(&self, key: TypeKey) -> Arc<TypeInfo> {
        if let Some(info) = self.cache.get(&key.id()) {
            return Arc::clone(info.value());
        }

        let info = Arc::new(describe(key));
        log::trace!(
            "[type_cache] described {} as {:?} ({})",
            key.name(),
            info.kind,
            info.type_name()
        );

        Arc::clone(self.cache.entry(key.id()).or_insert(info).value())
    }

    /// Number of declared types described so far.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

/// Follow the pointer chain starting at `key` and summarize its end.
fn describe(key: TypeKey) -> TypeInfo {
    let mut resolved = key;
    let mut shape = key.shape();
    while let Shape::Pointer { pointee } = shape {
        resolved = pointee;
        shape = pointee.shape();
    }
    TypeInfo::from_shape(resolved, shape)
}

/// The cache shared by every [`crate::Value`].
pub fn type_cache() -> &'static TypeInfoCache {
    static CACHE: OnceLock<TypeInfoCache> = OnceLock::new();
    CACHE.get_or_init(TypeInfoCache::new)
}
