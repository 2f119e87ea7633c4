// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-type member index and the concurrent cache that holds it.
//!
//! A type's declared members never change for the life of the process, so
//! the name -> accessor / name -> field maps are built once per type and
//! shared. The cache is keyed by `TypeId`; concurrent first lookups for the
//! same type share one build slot and all but one wait for its index.

use crate::introspect::{AccessorDescriptor, FieldDescriptor, Introspect, TypeDescriptor};
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

static GLOBAL_CACHE: OnceLock<MemberCache> = OnceLock::new();

/// Name-indexed view over a [`TypeDescriptor`].
pub struct MemberIndex<T> {
    descriptor: TypeDescriptor<T>,
    /// Zero-argument accessors only; first declared wins.
    accessors: HashMap<String, usize>,
    fields: HashMap<String, usize>,
}

impl<T> MemberIndex<T> {
    /// Index a descriptor.
    pub fn new(descriptor: TypeDescriptor<T>) -> Self {
        let mut accessors = HashMap::new();
        for (pos, accessor) in descriptor.accessors().iter().enumerate() {
            if !accessor.is_nullary() {
                continue;
            }
            match accessors.entry(accessor.name().to_string()) {
                Entry::Vacant(slot) => {
                    slot.insert(pos);
                }
                Entry::Occupied(first) => {
                    log::debug!(
                        "[introspect] {}::{} declared twice, keeping #{} over #{}",
                        descriptor.name(),
                        accessor.name(),
                        first.get(),
                        pos
                    );
                }
            }
        }

        let mut fields = HashMap::new();
        for (pos, field) in descriptor.fields().iter().enumerate() {
            fields.entry(field.name().to_string()).or_insert(pos);
        }

        Self {
            descriptor,
            accessors,
            fields,
        }
    }

    /// Indexed type name.
    pub fn type_name(&self) -> &str {
        self.descriptor.name()
    }

    /// Process-unique identity of the indexed type.
    pub fn qualified_name(&self) -> &str {
        self.descriptor.qualified_name()
    }

    /// Underlying descriptor.
    pub fn descriptor(&self) -> &TypeDescriptor<T> {
        &self.descriptor
    }

    /// Zero-argument accessor by exact name.
    pub fn accessor(&self, name: &str) -> Option<&AccessorDescriptor<T>> {
        let pos = *self.accessors.get(name)?;
        self.descriptor.accessors().get(pos)
    }

    /// Field by exact name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor<T>> {
        let pos = *self.fields.get(name)?;
        self.descriptor.fields().get(pos)
    }
}

impl<T> fmt::Debug for MemberIndex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberIndex")
            .field("type_name", &self.type_name())
            .field("accessors", &self.accessors.len())
            .field("fields", &self.fields.len())
            .finish()
    }
}

/// Cache hit/miss statistics.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LookupStats {
    pub hits: u64,
    pub misses: u64,
}

/// Build-once slot for one type's index.
type Slot<T> = OnceLock<Arc<MemberIndex<T>>>;
type ErasedSlot = Arc<dyn Any + Send + Sync>;

/// Concurrent cache of member indexes keyed by type identity.
///
/// The map lock only guards slot creation. Descriptors are built inside the
/// type's own slot, so building one type may look up others in this cache.
pub struct MemberCache {
    inner: RwLock<HashMap<TypeId, ErasedSlot>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemberCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Process-wide cache.
    pub fn global() -> &'static MemberCache {
        GLOBAL_CACHE.get_or_init(MemberCache::new)
    }

    /// Fetch the index for `T`, building it on first use.
    pub fn get_or_build<T: Introspect>(&self) -> Arc<MemberIndex<T>> {
        let key = TypeId::of::<T>();

        let existing = self.inner.read().get(&key).cloned();
        let erased = match existing {
            Some(slot) => slot,
            None => {
                let mut map = self.inner.write();
                let slot = map
                    .entry(key)
                    .or_insert_with(|| Arc::new(Slot::<T>::new()) as ErasedSlot);
                Arc::clone(slot)
            }
        };
        let Ok(slot) = erased.downcast::<Slot<T>>() else {
            // Keys are TypeIds, so the slot always has this type.
            log::warn!(
                "[introspect] slot type confusion for {}",
                std::any::type_name::<T>()
            );
            return Arc::new(MemberIndex::new(T::type_descriptor()));
        };

        let mut built = false;
        let index = slot.get_or_init(|| {
            built = true;
            let index = Arc::new(MemberIndex::new(T::type_descriptor()));
            log::debug!(
                "[introspect] indexed {} ({}): {} accessors, {} fields",
                index.type_name(),
                index.qualified_name(),
                index.accessors.len(),
                index.fields.len()
            );
            index
        });
        let counter = if built { &self.misses } else { &self.hits };
        counter.fetch_add(1, Ordering::Relaxed);
        Arc::clone(index)
    }

    /// Returns `true` if `T` has been indexed.
    pub fn contains<T: Introspect>(&self) -> bool {
        self.inner
            .read()
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.downcast_ref::<Slot<T>>())
            .is_some_and(|slot| slot.get().is_some())
    }

    /// Number of cached types, including any still being built.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if no type has been indexed.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Snapshot of hit/miss counters.
    pub fn stats(&self) -> LookupStats {
        LookupStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl Default for MemberCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemberCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberCache")
            .field("types", &self.len())
            .field("stats", &self.stats())
            .finish()
    }
}
