//! Core types for batchproof
//!
//! This crate provides the value types shared by the Merkle engine and its
//! collaborators: the SHA-256 digest newtype used for every leaf, node and
//! root, and the identifier under which a tree is registered.

pub mod encoding;
pub mod error;
pub mod id;

pub use encoding::{Sha256Hash, SHA256_LEN};
pub use error::{Error, Result};
pub use id::TreeId;
