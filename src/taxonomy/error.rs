//! Error types for the taxonomy module

use crate::error::Error as CrateError;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for taxonomy operations
#[derive(Debug, Error)]
pub enum TaxonomyError {
    /// Taxonomy file could not be read
    #[error("Taxonomy file error: {0}")]
    Io(#[from] std::io::Error),

    /// Taxonomy file is absent or contains no entries
    #[error("Taxonomy at {} is absent or empty; a non-empty category list is required", path.display())]
    Empty {
        /// The configured taxonomy path
        path: PathBuf,
    },

    /// Category has no sufficiently close taxonomy match
    #[error("Category '{input}' is not a valid taxonomy category")]
    InvalidCategory {
        /// The offending input string
        input: String,
    },
}

impl From<TaxonomyError> for CrateError {
    fn from(err: TaxonomyError) -> Self {
        match err {
            TaxonomyError::Io(e) => CrateError::Io(e),
            _ => CrateError::Taxonomy(err.to_string()),
        }
    }
}
