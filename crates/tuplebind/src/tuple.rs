// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Positional record produced by packers.

use crate::value::Value;
use std::fmt;
use std::ops::Index;

/// Ordered sequence of slot values. Slot `i` holds schema field `i`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Tuple {
    values: Vec<Value>,
}

impl Tuple {
    /// Create a tuple from slot values.
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Number of slots.
    #[inline]
    pub fn arity(&self) -> usize {
        self.values.len()
    }

    /// Get slot by position.
    #[inline]
    pub fn get(&self, pos: usize) -> Option<&Value> {
        self.values.get(pos)
    }

    /// Iterate over slots in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// Borrow all slots.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Into inner slot vector.
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl From<Vec<Value>> for Tuple {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

impl FromIterator<Value> for Tuple {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Index<usize> for Tuple {
    type Output = Value;

    fn index(&self, pos: usize) -> &Value {
        &self.values[pos]
    }
}

impl<'a> IntoIterator for &'a Tuple {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let t = Tuple::new(vec![Value::I32(7), Value::String("Alice".into())]);
        assert_eq!(t.to_string(), "(7, \"Alice\")");
        assert_eq!(Tuple::default().to_string(), "()");
    }

    #[test]
    fn test_positional_access() {
        let t: Tuple = vec![Value::Bool(true), Value::Null].into_iter().collect();
        assert_eq!(t.arity(), 2);
        assert_eq!(t[0], Value::Bool(true));
        assert!(t.get(1).is_some_and(Value::is_null));
        assert!(t.get(2).is_none());
    }
}
