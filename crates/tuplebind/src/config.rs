// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Binding configuration.
//!
//! # Sources
//!
//! - **Code**: `BindConfig::default().with_getter_convention(..)`
//! - **Environment**: [`BindConfig::from_env`] reads [`ENV_GETTER_CONVENTION`]
//! - **YAML** (feature `config-loaders`): [`BindConfig::from_yaml_str`]
//!
//! ```rust
//! use tuplebind::{BindConfig, GetterConvention};
//!
//! let config = BindConfig::default().with_getter_convention(GetterConvention::SnakeCase);
//! assert_eq!(config.getter_convention.getter_name("age"), "get_age");
//! ```

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Environment variable selecting the getter convention (`javabean` | `snake_case`).
pub const ENV_GETTER_CONVENTION: &str = "TUPLEBIND_GETTER_CONVENTION";

/// Naming rule that derives a getter name from a field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GetterConvention {
    /// `age` -> `getAge`
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "javabean"))]
    JavaBean,
    /// `age` -> `get_age`
    #[cfg_attr(feature = "serde", serde(rename = "snake_case"))]
    SnakeCase,
}

impl GetterConvention {
    /// Getter name for a field under this convention.
    pub fn getter_name(self, field: &str) -> String {
        match self {
            Self::JavaBean => {
                let mut chars = field.chars();
                let mut name = String::with_capacity(field.len() + 3);
                name.push_str("get");
                if let Some(first) = chars.next() {
                    name.extend(first.to_uppercase());
                    name.push_str(chars.as_str());
                }
                name
            }
            Self::SnakeCase => format!("get_{}", field),
        }
    }
}

impl FromStr for GetterConvention {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "javabean" | "java_bean" | "bean" => Ok(Self::JavaBean),
            "snake_case" | "snake" => Ok(Self::SnakeCase),
            other => Err(Error::InvalidConfig(format!(
                "unknown getter convention '{}' (expected javabean or snake_case)",
                other
            ))),
        }
    }
}

impl fmt::Display for GetterConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JavaBean => write!(f, "javabean"),
            Self::SnakeCase => write!(f, "snake_case"),
        }
    }
}

/// Settings that shape accessor resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct BindConfig {
    /// Rule used for the first resolution step.
    pub getter_convention: GetterConvention,
}

impl BindConfig {
    /// Default configuration (JavaBean getters).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the getter convention.
    #[must_use]
    pub fn with_getter_convention(mut self, convention: GetterConvention) -> Self {
        self.getter_convention = convention;
        self
    }

    /// Load from process environment, defaults for unset variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary key lookup (environment, properties, ...).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(ENV_GETTER_CONVENTION) {
            config.getter_convention = raw.parse()?;
        }
        Ok(config)
    }

    /// Parse a YAML document such as `getter_convention: snake_case`.
    #[cfg(feature = "config-loaders")]
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| Error::InvalidConfig(e.to_string()))
    }
}
