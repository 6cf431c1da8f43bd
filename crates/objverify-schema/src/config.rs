//! # Verifier Configuration
//!
//! Settings that change how objects are reflected, never what a constraint
//! means. Loadable from YAML; every key is optional.
//!
//! ```yaml
//! reserved_prefix: "_"
//! short_circuit_phases: false
//! ```

use std::path::Path;

use objverify_core::{ReservedPrefix, DEFAULT_RESERVED_PREFIX};
use serde::Deserialize;

use crate::error::ConfigError;

/// Configuration for a [`Verifier`](crate::Verifier).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VerifierConfig {
    /// Field and attribute names starting with this prefix are hidden from
    /// validation. Empty hides nothing.
    pub reserved_prefix: String,
    /// Skip the class-attribute phase once the field phase has failed.
    pub short_circuit_phases: bool,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            reserved_prefix: DEFAULT_RESERVED_PREFIX.to_string(),
            short_circuit_phases: false,
        }
    }
}

impl VerifierConfig {
    /// Parse a YAML document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Yaml` on malformed YAML or unknown keys.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Read and parse a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, and
    /// `ConfigError::Yaml` if it cannot be parsed.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_yaml_str(&text)?;
        tracing::debug!(path = %path.display(), ?config, "loaded verifier config");
        Ok(config)
    }

    /// The reserved prefix as used by the reflection adapter.
    pub fn reserved_prefix(&self) -> ReservedPrefix {
        ReservedPrefix::new(self.reserved_prefix.as_str())
    }
}
