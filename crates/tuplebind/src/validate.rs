// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema validation: resolve every schema field against a type.
//!
//! Validation is idempotent and has no observable side effect beyond
//! memoising the type's member index, so a planner may call [`check`] to
//! reject a stage early and call [`validate`] again later (possibly in
//! another process) to obtain the bindings it actually uses.

use crate::error::Result;
use crate::introspect::Introspect;
use crate::resolve::{resolve_in, Accessor, Resolver};
use crate::schema::Schema;

/// Resolve all schema fields of `T`, in schema order.
///
/// Stops at the first field that cannot be resolved.
pub fn validate<T: Introspect>(
    schema: &Schema,
    resolver: &Resolver<'_>,
) -> Result<Vec<Accessor<T>>> {
    let index = resolver.index::<T>();
    let config = resolver.config();

    let mut bindings = Vec::with_capacity(schema.len());
    for field in schema.names() {
        match resolve_in(&index, field, &config) {
            Ok(accessor) => bindings.push(accessor),
            Err(e) => {
                log::warn!(
                    "[validate] schema {} rejected for {}: {}",
                    schema,
                    index.type_name(),
                    e
                );
                return Err(e);
            }
        }
    }

    log::debug!(
        "[validate] {} bound {} fields of {}",
        schema,
        bindings.len(),
        index.type_name()
    );
    Ok(bindings)
}

/// Validate without keeping the bindings.
pub fn check<T: Introspect>(schema: &Schema, resolver: &Resolver<'_>) -> Result<()> {
    validate::<T>(schema, resolver).map(|_| ())
}
