//! Error types for the preprocess module

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for preprocessing operations
#[derive(Debug, Error)]
pub enum PreprocessError {
    /// CSS selector parsing error
    #[error("Selector parsing error: {0}")]
    SelectorParse(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl From<PreprocessError> for CrateError {
    fn from(err: PreprocessError) -> Self {
        match err {
            PreprocessError::Json(e) => CrateError::Json(e),
            _ => CrateError::Preprocess(err.to_string()),
        }
    }
}
