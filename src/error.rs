//! Error types for the pagelift crate

use thiserror::Error;

/// Result type for pagelift operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for pagelift operations
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error response
    #[error("API error: {status_code} - {message}")]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },

    /// Authentication error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Unexpected response format
    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document preprocessing error
    #[error("Preprocess error: {0}")]
    Preprocess(String),

    /// Taxonomy loading or category validation error
    #[error("Taxonomy error: {0}")]
    Taxonomy(String),

    /// Record validation or normalization error
    #[error("Record error: {0}")]
    Record(String),

    /// Batch pipeline error
    #[error("Pipeline error: {0}")]
    Pipeline(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}
