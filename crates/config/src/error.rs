//! Error types for configuration operations.
//!
//! This module defines the error types that can occur during configuration
//! loading, parsing, and validation.

use std::path::PathBuf;

/// Errors that can occur during configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file at {path}: {source}")]
    ReadFile {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a configuration file.
    #[error("failed to write config file at {path}: {source}")]
    WriteFile {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse JSON5 configuration.
    #[error("failed to parse config: {0}")]
    ParseJson5(#[from] serde_json5::Error),

    /// Failed to serialize configuration to JSON.
    #[error("failed to serialize config: {0}")]
    SerializeJson(#[from] serde_json::Error),

    /// The API base URL does not parse.
    #[error("invalid API URL {url:?}: {source}")]
    InvalidApiUrl {
        /// The rejected value.
        url: String,
        /// The parser error.
        #[source]
        source: url::ParseError,
    },

    /// The API base URL parses but is not served over HTTP.
    #[error("unsupported API URL scheme {scheme:?}, expected http or https")]
    UnsupportedScheme {
        /// The rejected scheme.
        scheme: String,
    },

    /// Unknown theme name.
    #[error("invalid theme {0:?}, expected \"light\" or \"dark\"")]
    InvalidTheme(String),

    /// Invalid person entry.
    #[error("invalid person: {0}")]
    InvalidPerson(String),

    /// No assignable people are configured.
    #[error("at least one person must be configured")]
    NoPeople,

    /// A request timeout of zero seconds was configured.
    #[error("request timeout must be at least one second")]
    InvalidTimeout,

    /// Failed to determine home directory.
    #[error("could not determine home directory")]
    NoHomeDirectory,
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
