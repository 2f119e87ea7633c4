// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Name-keyed registry of packable types.
//!
//! A planner that receives [`PackerPlan`]s only knows type names. The
//! registry maps each name back to the statically typed validation routine
//! so whole batches of plans can be checked before a run starts. Names are
//! qualified names and stay bound to the first type registered under them.

use crate::error::{Error, Result};
use crate::introspect::{Introspect, MemberCache};
use crate::plan::PackerPlan;
use crate::resolve::Resolver;
use crate::schema::Schema;
use crate::validate::check;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::any::TypeId;
use std::fmt;

type CheckFn = fn(&Schema, &Resolver<'_>) -> Result<()>;

/// Concurrent registry of type name -> validation routine.
#[derive(Default)]
pub struct TypeRegistry {
    types: DashMap<String, (TypeId, CheckFn)>,
}

impl TypeRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` under its qualified name. Returns that name.
    ///
    /// Registering the same type again is a no-op. A name already held by a
    /// different type fails with [`Error::DuplicateType`].
    pub fn register<T: Introspect>(&self, cache: &MemberCache) -> Result<String> {
        let name = cache.get_or_build::<T>().qualified_name().to_string();
        match self.types.entry(name.clone()) {
            Entry::Occupied(entry) if entry.get().0 == TypeId::of::<T>() => {
                log::debug!("[registry] type '{}' already registered", name);
            }
            Entry::Occupied(_) => {
                log::warn!(
                    "[registry] '{}' is taken, refusing {}",
                    name,
                    std::any::type_name::<T>()
                );
                return Err(Error::DuplicateType(name));
            }
            Entry::Vacant(entry) => {
                entry.insert((TypeId::of::<T>(), check::<T> as CheckFn));
            }
        }
        Ok(name)
    }

    /// Returns `true` if a type with this name is registered.
    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no types are registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered type names, sorted.
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.types.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Validate one plan against its registered type.
    pub fn check(&self, plan: &PackerPlan, cache: &MemberCache) -> Result<()> {
        let validator = self
            .types
            .get(plan.type_name())
            .map(|entry| entry.value().1)
            .ok_or_else(|| Error::UnknownType(plan.type_name().to_string()))?;
        validator(plan.schema(), &Resolver::new(cache, plan.config()))
    }

    /// Validate every plan, stopping at the first failure.
    pub fn check_all<'a, I>(&self, plans: I, cache: &MemberCache) -> Result<()>
    where
        I: IntoIterator<Item = &'a PackerPlan>,
    {
        plans
            .into_iter()
            .try_for_each(|plan| self.check(plan, cache))
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.type_names())
            .finish()
    }
}
