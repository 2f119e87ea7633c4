// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Ordered field-name schema.

use std::fmt;
use std::sync::Arc;

/// Ordered, immutable sequence of field names.
///
/// Position `i` in the schema is slot `i` in every tuple packed against it.
/// Cloning shares the underlying storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<String>", into = "Vec<String>"))]
pub struct Schema {
    fields: Arc<[Arc<str>]>,
}

impl Schema {
    /// Create a schema from field names, keeping their order.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        Self {
            fields: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Field count.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the schema has no fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field name at a position.
    pub fn get(&self, pos: usize) -> Option<&str> {
        self.fields.get(pos).map(|name| &**name)
    }

    /// Position of the first field with the given name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| &**f == name)
    }

    /// Iterate over field names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|name| &**name)
    }
}

impl From<Vec<String>> for Schema {
    fn from(names: Vec<String>) -> Self {
        Self::new(names)
    }
}

impl From<&[&str]> for Schema {
    fn from(names: &[&str]) -> Self {
        Self::new(names.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for Schema {
    fn from(names: [&str; N]) -> Self {
        Self::new(names)
    }
}

impl From<Schema> for Vec<String> {
    fn from(schema: Schema) -> Self {
        schema.names().map(str::to_string).collect()
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, name) in self.names().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", name)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_preserved() {
        let schema = Schema::from(["name", "id", "age"]);
        let names: Vec<_> = schema.names().collect();
        assert_eq!(names, vec!["name", "id", "age"]);
        assert_eq!(schema.position("age"), Some(2));
        assert_eq!(schema.get(1), Some("id"));
        assert_eq!(schema.to_string(), "[name, id, age]");
    }

    #[test]
    fn test_clone_shares_storage() {
        let schema = Schema::from(["a", "b"]);
        let copy = schema.clone();
        assert!(Arc::ptr_eq(&schema.fields, &copy.fields));
        assert_eq!(schema, copy);
    }

    #[test]
    fn test_empty_schema() {
        let schema = Schema::new(Vec::<String>::new());
        assert!(schema.is_empty());
        assert_eq!(schema.len(), 0);
    }
}
