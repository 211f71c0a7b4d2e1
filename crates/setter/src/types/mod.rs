// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type classification: descriptors and the cache that memoizes them.

mod cache;
mod descriptor;

pub use cache::{type_cache, TypeInfoCache};
pub use descriptor::{FieldInfo, Kind, ScalarKind, Shape, Tags, TypeInfo, TypeKey};
