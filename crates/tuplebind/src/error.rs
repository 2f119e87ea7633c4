// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error type shared by resolution, validation and packer construction.
//!
//! Every variant is raised while a packer is being planned. None of them can
//! be produced by `pack` itself, so a pipeline stage either starts with a
//! fully bound packer or does not start at all.

/// Errors raised while planning a packer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ========================================================================
    // Resolution Errors
    // ========================================================================
    /// Schema field matches no getter, no same-named accessor and no field.
    UnresolvedField {
        /// Offending schema field name.
        field: String,
        /// Name of the target type.
        type_name: String,
    },

    // ========================================================================
    // Construction Errors
    // ========================================================================
    /// Caller-supplied packing function declares a different arity than the schema.
    ArityMismatch {
        /// Name of the target type.
        type_name: String,
        /// Field count of the schema.
        expected: usize,
        /// Arity declared by the packing function.
        declared: usize,
    },

    // ========================================================================
    // Plan Errors
    // ========================================================================
    /// Plan names a type that is not registered in this process.
    UnknownType(String),
    /// Plan was written for a different type than the one it is bound to.
    TypeMismatch {
        /// Type name recorded in the plan.
        expected: String,
        /// Type name of the binding target.
        found: String,
    },

    // ========================================================================
    // Registry Errors
    // ========================================================================
    /// Name already registered for a different type.
    DuplicateType(String),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration value could not be parsed.
    InvalidConfig(String),
}

impl Error {
    /// Build an [`Error::UnresolvedField`].
    pub fn unresolved(field: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::UnresolvedField {
            field: field.into(),
            type_name: type_name.into(),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnresolvedField { field, type_name } => write!(
                f,
                "Unresolved field '{}' on type '{}': no getter, accessor or field matches",
                field, type_name
            ),
            Error::ArityMismatch {
                type_name,
                expected,
                declared,
            } => write!(
                f,
                "Arity mismatch for type '{}': schema has {} fields, packing function declares {}",
                type_name, expected, declared
            ),
            Error::UnknownType(name) => write!(f, "Unknown type: {}", name),
            Error::TypeMismatch { expected, found } => {
                write!(f, "Plan type mismatch: expected {}, got {}", expected, found)
            }
            Error::DuplicateType(name) => write!(
                f,
                "Type name '{}' already registered for a different type",
                name
            ),
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Convenient alias for results using the crate [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
