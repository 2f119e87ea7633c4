// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Packer driven by resolved accessor bindings.

use crate::config::BindConfig;
use crate::error::Result;
use crate::introspect::Introspect;
use crate::plan::PackerPlan;
use crate::resolve::{Accessor, Resolver};
use crate::schema::Schema;
use crate::tuple::Tuple;
use crate::validate::validate;
use std::fmt;
use std::sync::Arc;

/// Packs instances by applying one bound accessor per schema field.
///
/// Construction validates the whole schema, so an existing `TuplePacker`
/// always has exactly `schema.len()` bindings. With the `serde` feature the
/// packer serializes as its [`PackerPlan`]; deserializing re-runs validation
/// in the receiving process instead of shipping bindings.
pub struct TuplePacker<T> {
    type_name: Arc<str>,
    qualified_name: Arc<str>,
    schema: Schema,
    config: BindConfig,
    bindings: Arc<[Accessor<T>]>,
}

impl<T: Introspect> TuplePacker<T> {
    /// Validate `schema` against `T` with the default configuration and global cache.
    pub fn new(schema: Schema) -> Result<Self> {
        Self::with_resolver(schema, &Resolver::global(BindConfig::default()))
    }

    /// Validate `schema` against `T` through a specific resolver.
    pub fn with_resolver(schema: Schema, resolver: &Resolver<'_>) -> Result<Self> {
        let bindings = validate::<T>(&schema, resolver)?;
        let index = resolver.index::<T>();
        Ok(Self {
            type_name: Arc::from(index.type_name()),
            qualified_name: Arc::from(index.qualified_name()),
            schema,
            config: resolver.config(),
            bindings: bindings.into(),
        })
    }
}

impl<T> TuplePacker<T> {
    /// Read every bound field of `instance` into a new tuple.
    pub fn pack(&self, instance: &T) -> Tuple {
        self.bindings.iter().map(|a| a.read(instance)).collect()
    }

    /// Slot count of produced tuples (always the schema's field count).
    #[inline]
    pub fn arity(&self) -> usize {
        self.bindings.len()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Bindings in schema order.
    pub fn bindings(&self) -> &[Accessor<T>] {
        &self.bindings
    }

    /// Transportable description of this packer.
    pub fn plan(&self) -> PackerPlan {
        PackerPlan::new(&*self.qualified_name, self.schema.clone(), self.config)
    }
}

impl<T> Clone for TuplePacker<T> {
    fn clone(&self) -> Self {
        Self {
            type_name: Arc::clone(&self.type_name),
            qualified_name: Arc::clone(&self.qualified_name),
            schema: self.schema.clone(),
            config: self.config,
            bindings: Arc::clone(&self.bindings),
        }
    }
}

impl<T> fmt::Debug for TuplePacker<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TuplePacker")
            .field("type_name", &self.type_name)
            .field("schema", &self.schema)
            .field("bindings", &self.bindings)
            .finish()
    }
}

#[cfg(feature = "serde")]
impl<T> serde::Serialize for TuplePacker<T> {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.plan(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T: Introspect> serde::Deserialize<'de> for TuplePacker<T> {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let plan = <PackerPlan as serde::Deserialize>::deserialize(deserializer)?;
        plan.bind_global::<T>().map_err(serde::de::Error::custom)
    }
}
