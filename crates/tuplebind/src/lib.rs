// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # tuplebind - plan-time accessor resolution and tuple packing
//!
//! Converts typed records into positional tuples for a dataflow engine. A
//! [`Schema`] names the tuple slots; for each name the binder finds how to
//! read the value off an instance, once, while the stage is planned. Packing
//! is then a straight walk over the bound accessors.
//!
//! ## Quick Start
//!
//! ```rust
//! use tuplebind::{accessors, Introspect, PackerFactory, PackStrategy, Schema};
//!
//! #[derive(Introspect)]
//! #[introspect(accessors)]
//! struct Person {
//!     id: i32,
//!     name: String,
//! }
//!
//! #[accessors]
//! impl Person {
//!     #[accessor(name = "getId")]
//!     fn id(&self) -> i32 {
//!         self.id
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
//!
//! ## Resolution
//!
//! For a schema field `age` the first match wins: the getter named by the
//! configured [`GetterConvention`] (`getAge`), a zero-argument accessor named
//! `age`, then a field named `age`. Anything else is an
//! [`Error::UnresolvedField`] reported before any instance is packed.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`PackerFactory`] | Chooses a packer strategy per (schema, type) pair |
//! | [`TuplePacker`] | Packs through accessors resolved from the type |
//! | [`DelegatingPacker`] | Packs through a caller-supplied [`PackFn`] |
//! | [`PackerPlan`] | Transportable description, re-bound in each process |
//! | [`MemberCache`] | Memoised per-type member indexes |
//!
//! ## Features
//!
//! - `serde`: serialize [`PackerPlan`], [`Schema`], [`Value`] and [`TuplePacker`]
//! - `config-loaders` (default): [`BindConfig::from_yaml_str`]

// Allow the derive macros to work inside this crate's tests
extern crate self as tuplebind;

/// Resolution settings.
pub mod config;
/// Error type.
pub mod error;
/// Packer selection.
pub mod factory;
/// Member descriptions and their cache.
pub mod introspect;
/// Packer implementations.
pub mod packer;
/// Transportable packer plans.
pub mod plan;
/// Name-keyed type registry.
pub mod registry;
/// Field resolution.
pub mod resolve;
/// Ordered field-name lists.
pub mod schema;
/// Positional tuples.
pub mod tuple;
/// Schema validation.
pub mod validate;
/// Dynamic values.
pub mod value;

pub use config::{BindConfig, GetterConvention, ENV_GETTER_CONVENTION};
pub use error::{Error, Result};
pub use factory::{PackStrategy, PackerFactory};
pub use introspect::{
    AccessorDescriptor, Accessors, FieldDescriptor, Introspect, LookupStats, MemberCache,
    MemberIndex, ReadFn, TypeDescriptor, TypeDescriptorBuilder,
};
pub use packer::{pack_fn, DelegatingPacker, FnPacker, PackFn, Packer, TuplePacker};
pub use plan::PackerPlan;
pub use registry::TypeRegistry;
pub use resolve::{resolve_in, AccessSource, Accessor, Resolver};
pub use schema::Schema;
pub use tuple::Tuple;
pub use validate::{check, validate};
pub use value::{ToValue, Value};

// Derive macro (#[derive(tuplebind::Introspect)]) and impl-block attribute.
pub use tuplebind_codegen::{accessors, Introspect};
