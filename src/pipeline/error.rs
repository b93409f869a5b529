//! Error types for the batch pipeline

use crate::preprocess::PreprocessError;
use crate::record::RecordError;
use crate::taxonomy::TaxonomyError;
use thiserror::Error;

/// Errors that can occur while running the pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    /// IO error reading documents or writing outputs
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Taxonomy loading error
    #[error(transparent)]
    Taxonomy(#[from] TaxonomyError),

    /// Record validation error
    #[error(transparent)]
    Record(#[from] RecordError),

    /// Preprocessing error
    #[error(transparent)]
    Preprocess(#[from] PreprocessError),

    /// Extraction boundary error
    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// Worker task error
    #[error("Task failed: {0}")]
    Task(String),

    /// Other pipeline error
    #[error("{0}")]
    Other(String),
}

impl From<PipelineError> for crate::error::Error {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Io(e) => crate::error::Error::Io(e),
            other => crate::error::Error::Pipeline(other.to_string()),
        }
    }
}
