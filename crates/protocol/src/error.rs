//! Error types for the corkboard-protocol crate.
//!
//! Protocol errors are raised where raw task records are validated against
//! the closed sets of statuses and priorities.

use thiserror::Error;

/// Errors that can occur during protocol operations.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// A record carried a status that matches no board column.
    #[error("unknown task status: {0:?}")]
    UnknownStatus(String),

    /// A record carried a priority outside Low/Medium/High.
    #[error("unknown task priority: {0:?}")]
    UnknownPriority(String),

    /// Failed to deserialize a protocol type from JSON.
    #[error("failed to deserialize from JSON: {0}")]
    DeserializationFailed(#[source] serde_json::Error),
}

/// A specialized Result type for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;
