// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Packers: turn typed instances into positional tuples.
//!
//! Two strategies exist, fixed when the packer is built:
//!
//! - [`TuplePacker`]: bindings resolved from the type's members
//! - [`DelegatingPacker`]: forwards to a caller-supplied [`PackFn`]
//!
//! Both are `Send + Sync` and read-only after construction, so one packer
//! can serve every worker thread of a stage.

mod delegating;
mod reflective;

pub use delegating::{pack_fn, DelegatingPacker, FnPacker, PackFn};
pub use reflective::TuplePacker;

use crate::schema::Schema;
use crate::tuple::Tuple;
use std::fmt;

/// A packer of either strategy.
pub enum Packer<T> {
    /// Accessor bindings resolved from the type.
    Reflective(TuplePacker<T>),
    /// Caller-supplied packing function.
    Delegating(DelegatingPacker<T>),
}

impl<T> Packer<T> {
    /// Pack one instance.
    pub fn pack(&self, instance: &T) -> Tuple {
        match self {
            Self::Reflective(p) => p.pack(instance),
            Self::Delegating(p) => p.pack(instance),
        }
    }

    /// Pack a batch of instances, preserving order.
    pub fn pack_all<'a, I>(&self, instances: I) -> Vec<Tuple>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        instances.into_iter().map(|x| self.pack(x)).collect()
    }

    /// Slot count of produced tuples.
    pub fn arity(&self) -> usize {
        match self {
            Self::Reflective(p) => p.arity(),
            Self::Delegating(p) => p.arity(),
        }
    }

    pub fn schema(&self) -> &Schema {
        match self {
            Self::Reflective(p) => p.schema(),
            Self::Delegating(p) => p.schema(),
        }
    }

    /// Check if this packer resolves accessors itself.
    pub fn is_reflective(&self) -> bool {
        matches!(self, Self::Reflective(_))
    }
}

impl<T> Clone for Packer<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Reflective(p) => Self::Reflective(p.clone()),
            Self::Delegating(p) => Self::Delegating(p.clone()),
        }
    }
}

impl<T> fmt::Debug for Packer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reflective(p) => f.debug_tuple("Reflective").field(p).finish(),
            Self::Delegating(p) => f.debug_tuple("Delegating").field(p).finish(),
        }
    }
}

impl<T> From<TuplePacker<T>> for Packer<T> {
    fn from(packer: TuplePacker<T>) -> Self {
        Self::Reflective(packer)
    }
}

impl<T> From<DelegatingPacker<T>> for Packer<T> {
    fn from(packer: DelegatingPacker<T>) -> Self {
        Self::Delegating(packer)
    }
}
