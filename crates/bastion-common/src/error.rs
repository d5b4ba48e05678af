//! Error types for Bastion.

use thiserror::Error;

/// Top-level error type for Bastion operations.
#[derive(Debug, Error)]
pub enum BastionError {
    /// Tuning values failed validation
    #[error("Invalid tuning: {field}: {reason}")]
    InvalidTuning {
        /// Offending field
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Bastion operations.
pub type BastionResult<T> = Result<T, BastionError>;
