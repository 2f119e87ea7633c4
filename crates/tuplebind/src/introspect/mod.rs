// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime member descriptions for packable types.
//!
//! A [`TypeDescriptor`] lists what a type exposes to the binder: its declared
//! accessors (in declaration order, with parameter counts) and its directly
//! accessible fields. Descriptors come from the [`Introspect`] trait, either
//! written by hand with [`TypeDescriptorBuilder`] or generated by
//! `#[derive(Introspect)]` and `#[accessors]`.
//!
//! # Example
//!
//! ```rust
//! use tuplebind::{Introspect, ToValue, TypeDescriptor, TypeDescriptorBuilder};
//!
//! struct Person {
//!     id: i32,
//!     name: String,
//! }
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
//! let desc = Person::type_descriptor();
//! assert_eq!(desc.name(), "Person");
//! assert!(desc.field("name").is_some());
//! ```

mod builder;
mod index;

pub use builder::TypeDescriptorBuilder;
pub use index::{LookupStats, MemberCache, MemberIndex};

use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Reads one value off an instance.
pub type ReadFn<T> = Arc<dyn Fn(&T) -> Value + Send + Sync>;

/// Types that can describe their members at runtime.
pub trait Introspect: Sized + 'static {
    /// Describe the type's accessors and fields.
    ///
    /// Called once per [`MemberCache`], outside the cache's lock. An
    /// implementation may look up other types through the same cache, but
    /// must not (even transitively) request its own type: concurrent first
    /// lookups of a type wait on that type's single build.
    fn type_descriptor() -> TypeDescriptor<Self>;
}

/// Accessor declarations contributed by an `#[accessors]` impl block.
pub trait Accessors: Sized + 'static {
    /// Append this type's accessors to a descriptor under construction.
    fn declare_accessors(builder: TypeDescriptorBuilder<Self>) -> TypeDescriptorBuilder<Self>;
}

/// A declared accessor method.
pub struct AccessorDescriptor<T> {
    name: String,
    param_count: usize,
    /// Present only for zero-argument accessors.
    read: Option<ReadFn<T>>,
}

impl<T> AccessorDescriptor<T> {
    /// Zero-argument accessor.
    pub fn nullary(name: impl Into<String>, read: ReadFn<T>) -> Self {
        Self {
            name: name.into(),
            param_count: 0,
            read: Some(read),
        }
    }

    /// Accessor requiring parameters. Recorded for completeness, never bound.
    pub fn with_params(name: impl Into<String>, param_count: usize) -> Self {
        Self {
            name: name.into(),
            param_count,
            read: None,
        }
    }

    /// Declared name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of declared parameters (receiver excluded).
    pub fn param_count(&self) -> usize {
        self.param_count
    }

    /// Check if this accessor can be called without arguments.
    pub fn is_nullary(&self) -> bool {
        self.param_count == 0 && self.read.is_some()
    }

    pub(crate) fn reader(&self) -> Option<&ReadFn<T>> {
        if self.param_count == 0 {
            self.read.as_ref()
        } else {
            None
        }
    }
}

impl<T> Clone for AccessorDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            param_count: self.param_count,
            read: self.read.clone(),
        }
    }
}

impl<T> fmt::Debug for AccessorDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessorDescriptor")
            .field("name", &self.name)
            .field("param_count", &self.param_count)
            .finish_non_exhaustive()
    }
}

/// A directly accessible field.
pub struct FieldDescriptor<T> {
    name: String,
    read: ReadFn<T>,
}

impl<T> FieldDescriptor<T> {
    /// Create a field descriptor.
    pub fn new(name: impl Into<String>, read: ReadFn<T>) -> Self {
        Self {
            name: name.into(),
            read,
        }
    }

    /// Field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn reader(&self) -> &ReadFn<T> {
        &self.read
    }
}

impl<T> Clone for FieldDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            read: Arc::clone(&self.read),
        }
    }
}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Complete member description of a type.
///
/// `name` is the short name used in diagnostics. `qualified_name` identifies
/// the type in plans and registries and must be unique within a process;
/// it defaults to `name` for hand-written descriptors.
pub struct TypeDescriptor<T> {
    name: String,
    qualified_name: String,
    accessors: Vec<AccessorDescriptor<T>>,
    fields: Vec<FieldDescriptor<T>>,
}

impl<T> TypeDescriptor<T> {
    /// Create a new type descriptor.
    pub fn new(
        name: impl Into<String>,
        accessors: Vec<AccessorDescriptor<T>>,
        fields: Vec<FieldDescriptor<T>>,
    ) -> Self {
        let name = name.into();
        Self {
            qualified_name: name.clone(),
            name,
            accessors,
            fields,
        }
    }

    /// Replace the identity used by plans and registries.
    #[must_use]
    pub fn with_qualified_name(mut self, qualified_name: impl Into<String>) -> Self {
        self.qualified_name = qualified_name.into();
        self
    }

    /// Type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Process-unique identity (`module::path::Type` for derived types).
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Declared accessors, in declaration order.
    pub fn accessors(&self) -> &[AccessorDescriptor<T>] {
        &self.accessors
    }

    /// Declared fields, in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor<T>] {
        &self.fields
    }

    /// First declared zero-argument accessor with this name.
    pub fn accessor(&self, name: &str) -> Option<&AccessorDescriptor<T>> {
        self.accessors
            .iter()
            .find(|a| a.is_nullary() && a.name == name)
    }

    /// First declared field with this name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor<T>> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl<T> Clone for TypeDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            qualified_name: self.qualified_name.clone(),
            accessors: self.accessors.clone(),
            fields: self.fields.clone(),
        }
    }
}

impl<T> fmt::Debug for TypeDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("qualified_name", &self.qualified_name)
            .field("accessors", &self.accessors)
            .field("fields", &self.fields)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ToValue;

    struct Sample {
        a: i32,
    }

    fn sample_descriptor() -> TypeDescriptor<Sample> {
        TypeDescriptorBuilder::new("Sample")
            .method_with_params("a", 1)
            .accessor("a", |p: &Sample| p.a.to_value())
            .accessor("a", |_: &Sample| Value::Null)
            .field("a", |p: &Sample| (p.a * 10).to_value())
            .build()
    }

    #[test]
    fn test_accessor_skips_parameterized_methods() {
        let desc = sample_descriptor();
        assert_eq!(desc.accessors().len(), 3);
        assert!(!desc.accessors()[0].is_nullary());
        assert!(desc.accessors()[0].reader().is_none());

        let sample = Sample { a: 4 };
        let accessor = desc.accessor("a").expect("nullary accessor");
        let read = accessor.reader().expect("reader");
        assert_eq!(read(&sample), Value::I32(4));
    }

    #[test]
    fn test_field_lookup() {
        let desc = sample_descriptor();
        let field = desc.field("a").expect("field");
        assert_eq!((field.reader())(&Sample { a: 2 }), Value::I32(20));
        assert!(desc.field("b").is_none());
    }

    #[test]
    fn test_debug_lists_names() {
        let out = format!("{:?}", sample_descriptor());
        assert!(out.contains("Sample"));
        assert!(out.contains("param_count: 1"));
    }
}
