//! Error types for task API operations.
//!
//! Every failure of a store call maps to one [`ClientError`]. None of them is
//! shown to the user: the sync layer logs them and carries on.

use corkboard_protocol::ProtocolError;
use reqwest::StatusCode;

/// Errors that can occur while talking to the task API.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request could not be sent or the response could not be read.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("server responded with {status}{}", format_body(.body))]
    Status {
        /// The response status.
        status: StatusCode,
        /// The response body, possibly empty.
        body: String,
    },

    /// The response body is not a list of task records.
    #[error("invalid response body: {0}")]
    Decode(#[from] ProtocolError),

    /// The configured base URL does not parse.
    #[error("invalid base URL {url:?}: {source}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// The parser error.
        #[source]
        source: url::ParseError,
    },
}

fn format_body(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}

/// A specialized Result type for task API operations.
pub type Result<T> = std::result::Result<T, ClientError>;
