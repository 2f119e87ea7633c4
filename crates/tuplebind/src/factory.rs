// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Packer selection at plan time.
//!
//! The caller states the strategy for every (schema, type) pair explicitly;
//! there is no ambient registry consulted behind its back.
//!
//! ```rust
//! use tuplebind::{Introspect, PackerFactory, PackStrategy, Schema, ToValue};
//! use tuplebind::{TypeDescriptor, TypeDescriptorBuilder};
//!
//! struct Person { id: i32, name: String }
//!
//! impl Introspect for Person {
//!     fn type_descriptor() -> TypeDescriptor<Self> {
//!         TypeDescriptorBuilder::new("Person")
//!             .accessor("getId", |p: &Person| p.id.to_value())
//!             .field("name", |p: &Person| p.name.to_value())
//!             .build()
//!     }
//! }
//!
//! let factory = PackerFactory::default();
//! let packer = factory
//!     .build::<Person>(Schema::from(["id", "name"]), PackStrategy::Reflect)
//!     .unwrap();
//! let tuple = packer.pack(&Person { id: 7, name: "Alice".into() });
//! assert_eq!(tuple.to_string(), "(7, \"Alice\")");
//! ```

use crate::config::BindConfig;
use crate::error::Result;
use crate::introspect::{Introspect, MemberCache};
use crate::packer::{DelegatingPacker, PackFn, Packer, TuplePacker};
use crate::plan::PackerPlan;
use crate::resolve::Resolver;
use crate::schema::Schema;
use std::fmt;
use std::sync::Arc;

/// How a packer for one (schema, type) pair is obtained.
pub enum PackStrategy<T> {
    /// Resolve accessors from the type's members.
    Reflect,
    /// Use this packing function as-is.
    Delegate(Arc<dyn PackFn<T>>),
}

impl<T> Default for PackStrategy<T> {
    fn default() -> Self {
        Self::Reflect
    }
}

impl<T> From<Option<Arc<dyn PackFn<T>>>> for PackStrategy<T> {
    fn from(func: Option<Arc<dyn PackFn<T>>>) -> Self {
        match func {
            Some(func) => Self::Delegate(func),
            None => Self::Reflect,
        }
    }
}

impl<T> From<Arc<dyn PackFn<T>>> for PackStrategy<T> {
    fn from(func: Arc<dyn PackFn<T>>) -> Self {
        Self::Delegate(func)
    }
}

impl<T> fmt::Debug for PackStrategy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reflect => write!(f, "Reflect"),
            Self::Delegate(func) => write!(f, "Delegate(arity={})", func.arity()),
        }
    }
}

/// Builds packers during planning.
#[derive(Debug, Clone, Copy)]
pub struct PackerFactory<'c> {
    resolver: Resolver<'c>,
}

impl PackerFactory<'static> {
    /// Factory over the process-wide member cache.
    pub fn new(config: BindConfig) -> Self {
        Self {
            resolver: Resolver::global(config),
        }
    }
}

impl Default for PackerFactory<'static> {
    fn default() -> Self {
        Self::new(BindConfig::default())
    }
}

impl<'c> PackerFactory<'c> {
    /// Factory over a caller-owned member cache.
    pub fn with_cache(cache: &'c MemberCache, config: BindConfig) -> Self {
        Self {
            resolver: Resolver::new(cache, config),
        }
    }

    pub fn resolver(&self) -> &Resolver<'c> {
        &self.resolver
    }

    /// Build a packer for `T` with the given strategy.
    ///
    /// Fails with `UnresolvedField` (reflective) or `ArityMismatch`
    /// (delegated) before any instance is packed.
    pub fn build<T: Introspect>(
        &self,
        schema: Schema,
        strategy: impl Into<PackStrategy<T>>,
    ) -> Result<Packer<T>> {
        match strategy.into() {
            PackStrategy::Reflect => {
                log::debug!(
                    "[factory] {} for {}: reflective",
                    schema,
                    std::any::type_name::<T>()
                );
                TuplePacker::with_resolver(schema, &self.resolver).map(Packer::Reflective)
            }
            PackStrategy::Delegate(func) => self.delegate(schema, func),
        }
    }

    /// Build a delegating packer. `T` needs no member description.
    pub fn delegate<T>(&self, schema: Schema, func: Arc<dyn PackFn<T>>) -> Result<Packer<T>> {
        log::debug!(
            "[factory] {} for {}: delegated (arity {})",
            schema,
            std::any::type_name::<T>(),
            func.arity()
        );
        DelegatingPacker::new(schema, func).map(Packer::Delegating)
    }

    /// Transportable plan for a reflective packer of `T`.
    pub fn plan<T: Introspect>(&self, schema: Schema) -> PackerPlan {
        let index = self.resolver.index::<T>();
        PackerPlan::new(index.qualified_name(), schema, self.resolver.config())
    }
}
