//! Error types for batchproof-types

use thiserror::Error;

/// Errors that can occur in batchproof-types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input could not be decoded into the requested type
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),
}

/// Result type for batchproof-types operations
pub type Result<T> = std::result::Result<T, Error>;
