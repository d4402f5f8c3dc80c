//! Access checker configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for [`LogicalPermissions`](crate::LogicalPermissions)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogicalPermissionsConfig {
    /// Whether `check_access_default` lets the bypass checker grant access
    pub allow_bypass: bool,

    /// Whether `add_type` replaces a checker already registered under the same name
    pub overwrite_types: bool,
}

impl Default for LogicalPermissionsConfig {
    fn default() -> Self {
        Self {
            allow_bypass: true,
            overwrite_types: false,
        }
    }
}

impl LogicalPermissionsConfig {
    /// Parse configuration from TOML
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Load configuration from a TOML file; a missing file yields defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn with_allow_bypass(mut self, allow_bypass: bool) -> Self {
        self.allow_bypass = allow_bypass;
        self
    }

    pub fn with_overwrite_types(mut self, overwrite_types: bool) -> Self {
        self.overwrite_types = overwrite_types;
        self
    }
}
