//! Error types for the record module

use crate::error::Error as CrateError;
use crate::taxonomy::TaxonomyError;
use thiserror::Error;

/// Error type for record validation
#[derive(Debug, Error)]
pub enum RecordError {
    /// Price amount is negative
    #[error("Price amount must be non-negative, got {0}")]
    NegativeAmount(f64),

    /// Compare-at amount is below the selling price
    #[error("Compare-at amount {compare_at} is below the selling price {amount}")]
    CompareAtBelowAmount {
        /// The compare-at amount
        compare_at: f64,
        /// The selling price
        amount: f64,
    },

    /// Category failed taxonomy validation
    #[error(transparent)]
    Category(#[from] TaxonomyError),
}

impl From<RecordError> for CrateError {
    fn from(err: RecordError) -> Self {
        CrateError::Record(err.to_string())
    }
}
