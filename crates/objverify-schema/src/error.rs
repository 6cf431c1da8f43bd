//! # Error Types
//!
//! Verification never errors; a mismatch is just `false`. These errors
//! cover the edges around it: loading configuration and the opt-in
//! [`Schema::check_bounds`](crate::Schema::check_bounds) audit.

use objverify_core::Number;
use thiserror::Error;

/// A schema whose bounds can never be satisfied.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// `min_len` is larger than `max_len`.
    #[error("{path}: min_len {min_len} exceeds max_len {max_len}")]
    InvertedLength {
        /// Dotted path to the offending constraint.
        path: String,
        /// Declared minimum length.
        min_len: usize,
        /// Declared maximum length.
        max_len: usize,
    },

    /// The low bound is larger than the high bound.
    #[error("{path}: low bound {low} exceeds high bound {high}")]
    InvertedRange {
        /// Dotted path to the offending constraint.
        path: String,
        /// Declared low bound.
        low: Number,
        /// Declared high bound.
        high: Number,
    },
}

/// Error loading a [`VerifierConfig`](crate::VerifierConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The YAML document could not be parsed into a config.
    #[error("invalid verifier config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The config file could not be read.
    #[error("cannot read verifier config '{path}': {source}")]
    Io {
        /// Path that failed to load.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}
