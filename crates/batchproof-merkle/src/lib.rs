//! Binary Merkle trees over SHA-256 leaf hashes
//!
//! This crate builds a tree from an ordered list of precomputed leaf hashes,
//! extracts inclusion proofs for a leaf and verifies those proofs against a
//! root hash obtained independently. A [`TreeRegistry`] keeps trees keyed by
//! their [`TreeId`].
//!
//! ```
//! use batchproof_merkle::{hash_content, verify_proof, MerkleTree, TreeId, TreeRegistry};
//!
//! let files: [&[u8]; 3] = [b"a.txt", b"b.txt", b"c.txt"];
//! let tree = MerkleTree::from_contents(TreeId::new_v4(), files).unwrap();
//! let root = tree.root_hash();
//!
//! let leaf = hash_content(b"b.txt");
//! let proof = tree.prove(&leaf).unwrap();
//! assert!(verify_proof(&root, &leaf, &proof));
//!
//! let registry = TreeRegistry::new();
//! let id = tree.id();
//! registry.add(tree).unwrap();
//! assert_eq!(registry.get(&id).unwrap().root_hash(), root);
//! ```

pub mod error;
pub mod hash;
pub mod proof;
pub mod registry;
pub mod tree;

pub use batchproof_types::{Sha256Hash, TreeId};
pub use error::{Error, Result};
pub use hash::{hash_content, hash_pair, HASH_SIZE};
pub use proof::{compute_root, create_proof, verify_proof, verify_proof_hex, Proof, ProofStep};
pub use registry::{RegistryOptions, TreeRegistry};
pub use tree::{build_tree, build_tree_with_id, MerkleTree, NodeRef};
