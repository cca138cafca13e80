//! Configuration loading error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading configuration files.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("configuration file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// Failed to read a configuration file.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// JSON parsing error.
    #[error("failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The file extension names no supported format.
    #[error("unsupported configuration format: {path} (expected .json or .toml)")]
    UnsupportedFormat {
        /// Path with the unrecognized extension.
        path: PathBuf,
    },

    /// The document's top level is not an object.
    #[error("configuration document must be an object: {path}")]
    NotAnObject {
        /// Path to the offending document.
        path: PathBuf,
    },

    /// An in-memory layer is not an object.
    #[error("configuration layer must be an object")]
    InvalidLayer,
}
