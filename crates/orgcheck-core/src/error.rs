//! # Error Types
//!
//! Failures at the document boundary: reading, decoding and parsing input.
//! Validation itself never fails; it reports findings as diagnostics.

use thiserror::Error;

/// Error while turning input into a [`Document`](crate::Document).
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The text was not valid YAML.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A mapping key could not be represented as a string.
    #[error("unsupported mapping key {key} at {path}")]
    UnsupportedKey {
        /// Debug rendering of the offending key.
        key: String,
        /// Dotted path of the mapping that holds the key.
        path: String,
    },

    /// The input could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
