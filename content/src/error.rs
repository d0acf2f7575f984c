//! Error types for journal content

use thiserror::Error;

/// Errors that can occur while validating or shaping entry content
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ContentError {
    /// A submitted date did not match the `YYYY-MM-DD` form format
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Submitted entry content failed validation
    #[error("Content validation failed: {0}")]
    ValidationError(String),
}
