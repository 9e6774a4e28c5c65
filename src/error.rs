//! Error types for the Trello MCP server.

use thiserror::Error;

/// Errors that can occur when using the Trello client.
#[derive(Debug, Error)]
pub enum Error {
    /// A required environment variable is not set or is empty.
    #[error("{0} environment variable is not set")]
    MissingVar(&'static str),

    /// An environment variable holds a value that cannot be used.
    #[error("invalid value for {name}: {value:?}")]
    InvalidVar {
        /// The variable name.
        name: &'static str,
        /// The rejected value.
        value: String,
    },

    /// The HTTP client could not be initialized.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to parse a response from the API.
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// A classified remote failure: non-2xx response, timeout, or network error.
    ///
    /// `status` is taken from the response when one was received, 500 otherwise.
    #[error("API error ({status}): {message}")]
    Api {
        /// The HTTP status code, or 500 when the failure never produced one.
        status: u16,
        /// The error message extracted from the response body, or a
        /// transport-level description.
        message: String,
    },
}
