// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Packer that forwards to a caller-supplied packing function.

use crate::error::{Error, Result};
use crate::schema::Schema;
use crate::tuple::Tuple;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// A type-specific packing function with a declared arity.
pub trait PackFn<T>: Send + Sync {
    /// Slot count of every tuple this function produces.
    fn arity(&self) -> usize;

    /// Pack one instance.
    ///
    /// Must return exactly [`arity`](Self::arity) slots for every instance.
    /// [`DelegatingPacker`] checks the declared arity once at construction;
    /// per-tuple checks only run in debug builds, so a release build passes a
    /// short or long tuple through unchanged.
    fn pack(&self, instance: &T) -> Tuple;
}

/// [`PackFn`] backed by a closure.
pub struct FnPacker<T, F> {
    arity: usize,
    func: F,
    _marker: PhantomData<fn(&T)>,
}

impl<T, F> FnPacker<T, F>
where
    F: Fn(&T) -> Tuple + Send + Sync,
{
    pub fn new(arity: usize, func: F) -> Self {
        Self {
            arity,
            func,
            _marker: PhantomData,
        }
    }
}

impl<T, F> PackFn<T> for FnPacker<T, F>
where
    F: Fn(&T) -> Tuple + Send + Sync,
{
    fn arity(&self) -> usize {
        self.arity
    }

    fn pack(&self, instance: &T) -> Tuple {
        (self.func)(instance)
    }
}

/// Shorthand for `Arc::new(FnPacker::new(arity, func))`.
pub fn pack_fn<T, F>(arity: usize, func: F) -> Arc<dyn PackFn<T>>
where
    T: 'static,
    F: Fn(&T) -> Tuple + Send + Sync + 'static,
{
    Arc::new(FnPacker::new(arity, func))
}

/// Packs by delegation; no accessor resolution takes place.
pub struct DelegatingPacker<T> {
    schema: Schema,
    func: Arc<dyn PackFn<T>>,
}

impl<T> DelegatingPacker<T> {
    /// Wrap `func`, rejecting it if its arity differs from the schema's field count.
    pub fn new(schema: Schema, func: Arc<dyn PackFn<T>>) -> Result<Self> {
        let declared = func.arity();
        if declared != schema.len() {
            return Err(Error::ArityMismatch {
                type_name: std::any::type_name::<T>().to_string(),
                expected: schema.len(),
                declared,
            });
        }
        Ok(Self { schema, func })
    }

    /// Forward to the packing function.
    ///
    /// # Panics
    ///
    /// In debug builds, if the function returns a tuple whose arity differs
    /// from the one it declared.
    pub fn pack(&self, instance: &T) -> Tuple {
        let tuple = self.func.pack(instance);
        debug_assert_eq!(
            tuple.arity(),
            self.arity(),
            "packing function for {} broke its declared arity",
            std::any::type_name::<T>()
        );
        tuple
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.func.arity()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

impl<T> Clone for DelegatingPacker<T> {
    fn clone(&self) -> Self {
        Self {
            schema: self.schema.clone(),
            func: Arc::clone(&self.func),
        }
    }
}

impl<T> fmt::Debug for DelegatingPacker<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelegatingPacker")
            .field("schema", &self.schema)
            .field("arity", &self.arity())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{ToValue, Value};

    struct Pair {
        left: i32,
        right: String,
    }

    fn pair_fn() -> Arc<dyn PackFn<Pair>> {
        pack_fn(2, |p: &Pair| Tuple::new(vec![p.left.to_value(), p.right.to_value()]))
    }

    #[test]
    fn test_forwards_to_function() {
        let packer = DelegatingPacker::new(Schema::from(["left", "right"]), pair_fn())
            .expect("arity matches");
        assert_eq!(packer.arity(), 2);
        let t = packer.pack(&Pair {
            left: 3,
            right: "r".into(),
        });
        assert_eq!(t.values(), &[Value::I32(3), Value::String("r".into())]);
    }

    #[test]
    fn test_arity_mismatch_rejected() {
        let err = DelegatingPacker::new(Schema::from(["left", "right", "extra"]), pair_fn())
            .expect_err("3 != 2");
        match err {
            Error::ArityMismatch {
                expected, declared, ..
            } => {
                assert_eq!(expected, 3);
                assert_eq!(declared, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "broke its declared arity")]
    fn test_short_tuple_caught_in_debug() {
        let liar = pack_fn(2, |p: &Pair| Tuple::new(vec![p.left.to_value()]));
        let packer =
            DelegatingPacker::new(Schema::from(["left", "right"]), liar).expect("declares 2");
        packer.pack(&Pair {
            left: 1,
            right: String::new(),
        });
    }
}
