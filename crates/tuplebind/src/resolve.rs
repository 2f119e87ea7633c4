// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Capability resolution: how to read one named field off an instance.
//!
//! # Resolution order
//!
//! For a field `age`, the first match wins:
//!
//! 1. zero-argument accessor named by the getter convention (`getAge`)
//! 2. zero-argument accessor named `age`
//! 3. field named `age`
//!
//! Accessors that take parameters are never candidates. When several
//! zero-argument accessors share a name, the first declared one is used.
//! There is no fourth fallback: a miss is a definitive
//! [`Error::UnresolvedField`].

use crate::config::BindConfig;
use crate::error::{Error, Result};
use crate::introspect::{Introspect, MemberCache, MemberIndex, ReadFn};
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Which member kind satisfied a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessSource {
    /// Accessor named by the getter convention.
    Getter,
    /// Accessor with the same name as the field.
    Accessor,
    /// Direct field access.
    Field,
}

impl fmt::Display for AccessSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Getter => write!(f, "getter"),
            Self::Accessor => write!(f, "accessor"),
            Self::Field => write!(f, "field"),
        }
    }
}

/// A resolved binding from an instance to one field's value.
///
/// Bindings are process-local: they wrap function values and are never
/// serialized. Rebuild them from the schema and type instead.
pub struct Accessor<T> {
    field: Arc<str>,
    member: String,
    source: AccessSource,
    read: ReadFn<T>,
}

impl<T> Accessor<T> {
    /// Schema field this binding serves.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Name of the member that was bound (`getAge`, `age`, ...).
    pub fn member(&self) -> &str {
        &self.member
    }

    /// How the field was resolved.
    pub fn source(&self) -> AccessSource {
        self.source
    }

    /// Read the field's value from an instance.
    #[inline]
    pub fn read(&self, instance: &T) -> Value {
        (self.read)(instance)
    }
}

impl<T> Clone for Accessor<T> {
    fn clone(&self) -> Self {
        Self {
            field: Arc::clone(&self.field),
            member: self.member.clone(),
            source: self.source,
            read: Arc::clone(&self.read),
        }
    }
}

impl<T> fmt::Debug for Accessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("field", &self.field)
            .field("member", &self.member)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Resolves field names against cached member indexes.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'c> {
    cache: &'c MemberCache,
    config: BindConfig,
}

impl Resolver<'static> {
    /// Resolver over the process-wide member cache.
    pub fn global(config: BindConfig) -> Self {
        Self::new(MemberCache::global(), config)
    }
}

impl<'c> Resolver<'c> {
    pub fn new(cache: &'c MemberCache, config: BindConfig) -> Self {
        Self { cache, config }
    }

    /// Active configuration.
    pub fn config(&self) -> BindConfig {
        self.config
    }

    /// Member cache backing this resolver.
    pub fn cache(&self) -> &'c MemberCache {
        self.cache
    }

    /// Member index for `T` (built on first use).
    pub fn index<T: Introspect>(&self) -> Arc<MemberIndex<T>> {
        self.cache.get_or_build::<T>()
    }

    /// Resolve one field of `T`.
    pub fn resolve<T: Introspect>(&self, field: &str) -> Result<Accessor<T>> {
        let index = self.index::<T>();
        resolve_in(&index, field, &self.config)
    }
}

/// Resolve `field` against an already built index.
pub fn resolve_in<T>(
    index: &MemberIndex<T>,
    field: &str,
    config: &BindConfig,
) -> Result<Accessor<T>> {
    // An empty name would turn the getter convention into a bare `get`.
    if field.is_empty() {
        return Err(Error::unresolved(field, index.type_name()));
    }

    let getter = config.getter_convention.getter_name(field);
    let candidates = [
        (getter.as_str(), AccessSource::Getter),
        (field, AccessSource::Accessor),
    ];
    for (member, source) in candidates {
        if let Some(read) = index.accessor(member).and_then(|a| a.reader()) {
            return Ok(bind(index, field, member, source, Arc::clone(read)));
        }
    }

    if let Some(found) = index.field(field) {
        return Ok(bind(
            index,
            field,
            found.name(),
            AccessSource::Field,
            Arc::clone(found.reader()),
        ));
    }

    Err(Error::unresolved(field, index.type_name()))
}

fn bind<T>(
    index: &MemberIndex<T>,
    field: &str,
    member: &str,
    source: AccessSource,
    read: ReadFn<T>,
) -> Accessor<T> {
    log::debug!(
        "[resolve] {}.{} -> {} '{}'",
        index.type_name(),
        field,
        source,
        member
    );
    Accessor {
        field: Arc::from(field),
        member: member.to_string(),
        source,
        read,
    }
}
