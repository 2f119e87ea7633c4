// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Transportable packer plans.
//!
//! Accessor bindings wrap function values and only make sense in the process
//! that resolved them. What travels between planner and workers is the plan:
//! the type name, the schema and the resolution settings. Each worker binds
//! the plan locally, which re-runs validation against its own view of the
//! type.

use crate::config::BindConfig;
use crate::error::{Error, Result};
use crate::introspect::{Introspect, MemberCache};
use crate::packer::TuplePacker;
use crate::resolve::Resolver;
use crate::schema::Schema;
use crate::validate::check;

/// (type name, schema, config) triple from which a [`TuplePacker`] is rebuilt.
///
/// The type name is the target's qualified name (see
/// [`TypeDescriptor::qualified_name`](crate::TypeDescriptor::qualified_name)),
/// so same-named types in different modules never bind each other's plans.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackerPlan {
    type_name: String,
    schema: Schema,
    #[cfg_attr(feature = "serde", serde(default))]
    config: BindConfig,
}

impl PackerPlan {
    pub fn new(type_name: impl Into<String>, schema: Schema, config: BindConfig) -> Self {
        Self {
            type_name: type_name.into(),
            schema,
            config,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn config(&self) -> BindConfig {
        self.config
    }

    /// Validate against `T` and discard the bindings.
    pub fn check<T: Introspect>(&self, cache: &MemberCache) -> Result<()> {
        let resolver = self.resolver_for::<T>(cache)?;
        check::<T>(&self.schema, &resolver)
    }

    /// Rebuild a packer for `T` in this process.
    pub fn bind<T: Introspect>(&self, cache: &MemberCache) -> Result<TuplePacker<T>> {
        let resolver = self.resolver_for::<T>(cache)?;
        TuplePacker::with_resolver(self.schema.clone(), &resolver)
    }

    /// [`bind`](Self::bind) against the process-wide cache.
    pub fn bind_global<T: Introspect>(&self) -> Result<TuplePacker<T>> {
        self.bind(MemberCache::global())
    }

    fn resolver_for<'c, T: Introspect>(&self, cache: &'c MemberCache) -> Result<Resolver<'c>> {
        let resolver = Resolver::new(cache, self.config);
        let index = resolver.index::<T>();
        if index.qualified_name() != self.type_name {
            return Err(Error::TypeMismatch {
                expected: self.type_name.clone(),
                found: index.qualified_name().to_string(),
            });
        }
        Ok(resolver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GetterConvention;
    use crate::introspect::{TypeDescriptor, TypeDescriptorBuilder};
    use crate::value::{ToValue, Value};

    struct Sensor {
        sensor_id: u32,
    }

    impl Introspect for Sensor {
        fn type_descriptor() -> TypeDescriptor<Self> {
            TypeDescriptorBuilder::new("Sensor")
                .accessor("get_sensor_id", |s: &Sensor| s.sensor_id.to_value())
                .build()
        }
    }

    struct Other;

    impl Introspect for Other {
        fn type_descriptor() -> TypeDescriptor<Self> {
            TypeDescriptorBuilder::new("Other").build()
        }
    }

    #[test]
    fn test_bind_uses_plan_config() {
        let cache = MemberCache::new();
        let snake = BindConfig::default().with_getter_convention(GetterConvention::SnakeCase);
        let plan = PackerPlan::new("Sensor", Schema::from(["sensor_id"]), snake);

        let packer = plan.bind::<Sensor>(&cache).expect("snake getter");
        assert_eq!(packer.pack(&Sensor { sensor_id: 5 })[0], Value::U32(5));

        let bean = PackerPlan::new("Sensor", Schema::from(["sensor_id"]), BindConfig::default());
        assert!(bean.check::<Sensor>(&cache).is_err());
    }

    #[test]
    fn test_type_name_must_match() {
        let cache = MemberCache::new();
        let plan = PackerPlan::new("Sensor", Schema::from(["x"]), BindConfig::default());
        let err = plan.check::<Other>(&cache).expect_err("wrong type");
        assert_eq!(
            err,
            Error::TypeMismatch {
                expected: "Sensor".into(),
                found: "Other".into(),
            }
        );
    }
}
