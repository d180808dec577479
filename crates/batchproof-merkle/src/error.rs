//! Error types for batchproof-merkle

use batchproof_types::{Sha256Hash, TreeId};
use thiserror::Error;

/// Errors that can occur in Merkle tree operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A tree needs at least one leaf
    #[error("Cannot build a Merkle tree from zero leaves")]
    EmptyInput,

    /// No leaf of the tree carries the requested hash
    #[error("Hash not found in the Merkle tree: {0}")]
    HashNotFound(Sha256Hash),

    /// No tree is registered under the identifier
    #[error("Tree not found: {0}")]
    TreeNotFound(TreeId),

    /// A tree is already registered under the identifier
    #[error("Tree already exists: {0}")]
    TreeExists(TreeId),

    /// Hash or identifier decoding error
    #[error(transparent)]
    Types(#[from] batchproof_types::Error),
}

/// Result type for Merkle tree operations
pub type Result<T> = std::result::Result<T, Error>;
