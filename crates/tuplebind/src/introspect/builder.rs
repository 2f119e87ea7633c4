// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for TypeDescriptor.

use crate::introspect::{AccessorDescriptor, FieldDescriptor, TypeDescriptor};
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Builder for creating TypeDescriptor instances.
pub struct TypeDescriptorBuilder<T> {
    name: String,
    qualified_name: Option<String>,
    accessors: Vec<AccessorDescriptor<T>>,
    fields: Vec<FieldDescriptor<T>>,
}

impl<T> TypeDescriptorBuilder<T> {
    /// Create a new builder for a named type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qualified_name: None,
            accessors: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Set the process-unique identity. Defaults to the type name.
    pub fn qualified_name(mut self, qualified_name: impl Into<String>) -> Self {
        self.qualified_name = Some(qualified_name.into());
        self
    }

    /// Add a zero-argument accessor.
    pub fn accessor<F>(mut self, name: impl Into<String>, read: F) -> Self
    where
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        self.accessors
            .push(AccessorDescriptor::nullary(name, Arc::new(read)));
        self
    }

    /// Add an accessor that requires parameters.
    pub fn method_with_params(mut self, name: impl Into<String>, param_count: usize) -> Self {
        self.accessors
            .push(AccessorDescriptor::with_params(name, param_count));
        self
    }

    /// Add a directly accessible field.
    pub fn field<F>(mut self, name: impl Into<String>, read: F) -> Self
    where
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        self.fields.push(FieldDescriptor::new(name, Arc::new(read)));
        self
    }

    /// Build the TypeDescriptor.
    pub fn build(self) -> TypeDescriptor<T> {
        let desc = TypeDescriptor::new(self.name, self.accessors, self.fields);
        match self.qualified_name {
            Some(qualified) => desc.with_qualified_name(qualified),
            None => desc,
        }
    }
}

impl<T> fmt::Debug for TypeDescriptorBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptorBuilder")
            .field("name", &self.name)
            .field("qualified_name", &self.qualified_name)
            .field("accessors", &self.accessors.len())
            .field("fields", &self.fields.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ToValue;

    struct Reading {
        sensor_id: u32,
        temperature: f64,
    }

    #[test]
    fn test_builder_keeps_declaration_order() {
        let desc = TypeDescriptorBuilder::new("Reading")
            .accessor("getSensorId", |r: &Reading| r.sensor_id.to_value())
            .accessor("temperature", |r: &Reading| r.temperature.to_value())
            .field("sensor_id", |r: &Reading| r.sensor_id.to_value())
            .field("temperature", |r: &Reading| r.temperature.to_value())
            .build();

        let accessors: Vec<_> = desc.accessors().iter().map(|a| a.name()).collect();
        assert_eq!(accessors, vec!["getSensorId", "temperature"]);
        let fields: Vec<_> = desc.fields().iter().map(|f| f.name()).collect();
        assert_eq!(fields, vec!["sensor_id", "temperature"]);
        assert_eq!(desc.qualified_name(), "Reading");
    }

    #[test]
    fn test_qualified_name_override() {
        let desc = TypeDescriptorBuilder::<Reading>::new("Reading")
            .qualified_name("plant::Reading")
            .build();
        assert_eq!(desc.name(), "Reading");
        assert_eq!(desc.qualified_name(), "plant::Reading");
    }
}
