//! Merkle tree hashing
//!
//! Parent nodes are `SHA256(left || right)` with no domain-separation prefix,
//! so roots match the ones already recorded by the upload service.

use batchproof_types::Sha256Hash;
use sha2::{Digest, Sha256};

/// Hash size in bytes (SHA-256)
pub const HASH_SIZE: usize = batchproof_types::SHA256_LEN;

/// Hash raw content into a leaf hash
///
/// Returns: SHA256(data)
pub fn hash_content(data: &[u8]) -> Sha256Hash {
    Sha256Hash::from_bytes(Sha256::digest(data).into())
}

/// Hash two child nodes to create a parent node
///
/// Returns: SHA256(left || right)
pub fn hash_pair(left: &Sha256Hash, right: &Sha256Hash) -> Sha256Hash {
    let mut hasher = Sha256::new();
    hasher.update(left.as_bytes());
    hasher.update(right.as_bytes());
    Sha256Hash::from_bytes(hasher.finalize().into())
}
