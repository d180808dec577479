//! Inclusion proofs
//!
//! A proof is the list of sibling hashes on the path from a leaf up to the
//! root, each tagged with the side it is combined on. Verification needs only
//! the leaf hash, the proof and the expected root, never the tree itself.

use batchproof_types::Sha256Hash;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::hash::hash_pair;
use crate::tree::{MerkleTree, NodeRef};

/// One sibling on the path from a leaf to the root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofStep {
    /// Sibling hash
    pub hash: Sha256Hash,
    /// Whether the sibling is the left operand when recomputing the parent
    pub is_left_sibling: bool,
}

impl ProofStep {
    /// Sibling that is combined as the left operand
    pub fn left(hash: Sha256Hash) -> Self {
        Self {
            hash,
            is_left_sibling: true,
        }
    }

    /// Sibling that is combined as the right operand
    pub fn right(hash: Sha256Hash) -> Self {
        Self {
            hash,
            is_left_sibling: false,
        }
    }

    /// Combine `current` with this sibling on the recorded side
    pub fn apply(&self, current: &Sha256Hash) -> Sha256Hash {
        if self.is_left_sibling {
            hash_pair(&self.hash, current)
        } else {
            hash_pair(current, &self.hash)
        }
    }
}

/// Inclusion proof, ordered from the leaf upward to the root
///
/// Serializes as a JSON array of steps; the order is significant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Proof(Vec<ProofStep>);

impl Proof {
    /// Create a proof from steps ordered leaf to root
    pub fn new(steps: Vec<ProofStep>) -> Self {
        Proof(steps)
    }

    /// Steps ordered leaf to root
    pub fn steps(&self) -> &[ProofStep] {
        &self.0
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the proof has no steps (single-leaf tree)
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the steps, leaf to root
    pub fn iter(&self) -> std::slice::Iter<'_, ProofStep> {
        self.0.iter()
    }

    /// Convert into the underlying steps
    pub fn into_steps(self) -> Vec<ProofStep> {
        self.0
    }
}

impl From<Vec<ProofStep>> for Proof {
    fn from(steps: Vec<ProofStep>) -> Self {
        Proof(steps)
    }
}

impl FromIterator<ProofStep> for Proof {
    fn from_iter<I: IntoIterator<Item = ProofStep>>(iter: I) -> Self {
        Proof(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Proof {
    type Item = &'a ProofStep;
    type IntoIter = std::slice::Iter<'a, ProofStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Proof {
    type Item = ProofStep;
    type IntoIter = std::vec::IntoIter<ProofStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Branch {
    Left,
    Right,
}

/// An internal node on the current search path and the child being explored
struct Frame<'a> {
    node: NodeRef<'a>,
    branch: Branch,
}

/// Create an inclusion proof for the first leaf whose hash equals `target`
///
/// Leaves are searched depth-first, left subtree before right, so with
/// duplicate leaves (including the self-paired last node of an odd level) the
/// leftmost match wins. The search uses an explicit stack and does not
/// recurse.
///
/// # Errors
/// * [`Error::HashNotFound`] if no leaf carries `target`
pub fn create_proof(tree: &MerkleTree, target: &Sha256Hash) -> Result<Proof> {
    let mut path: Vec<Frame<'_>> = Vec::with_capacity(tree.height() as usize);
    let mut next = Some(tree.root());

    loop {
        match next.take() {
            Some(node) => match node.children() {
                Some((left, _)) => {
                    path.push(Frame {
                        node,
                        branch: Branch::Left,
                    });
                    next = Some(left);
                }
                None if node.hash() == target => break,
                None => {}
            },
            None => {
                // Backtrack to the nearest ancestor whose right subtree is unexplored
                loop {
                    let Some(frame) = path.last_mut() else {
                        tracing::debug!(tree = %tree.id(), hash = %target, "hash not found");
                        return Err(Error::HashNotFound(*target));
                    };
                    if frame.branch == Branch::Left {
                        frame.branch = Branch::Right;
                        next = frame.node.right();
                        break;
                    }
                    path.pop();
                }
            }
        }
    }

    let proof: Proof = path
        .iter()
        .rev()
        .filter_map(|frame| {
            let (left, right) = frame.node.children()?;
            Some(match frame.branch {
                Branch::Left => ProofStep::right(*right.hash()),
                Branch::Right => ProofStep::left(*left.hash()),
            })
        })
        .collect();

    tracing::debug!(tree = %tree.id(), hash = %target, steps = proof.len(), "created inclusion proof");
    Ok(proof)
}

/// Recompute the root hash implied by `leaf` and `proof`
pub fn compute_root(leaf: &Sha256Hash, proof: &Proof) -> Sha256Hash {
    proof.iter().fold(*leaf, |current, step| step.apply(&current))
}

/// Verify an inclusion proof against an expected root hash
///
/// Returns `false` on any mismatch; a failed verification is not an error.
pub fn verify_proof(expected_root: &Sha256Hash, leaf: &Sha256Hash, proof: &Proof) -> bool {
    let computed = compute_root(leaf, proof);
    let valid = &computed == expected_root;
    if !valid {
        tracing::trace!(expected = %expected_root, computed = %computed, "proof does not match root");
    }
    valid
}

/// Convenience function to verify a proof from hex-encoded root and leaf hashes
///
/// # Errors
/// * [`Error::Types`] if either hash is not 32 bytes of valid hex
pub fn verify_proof_hex(expected_root_hex: &str, leaf_hex: &str, proof: &Proof) -> Result<bool> {
    let expected_root = Sha256Hash::from_hex(expected_root_hex)?;
    let leaf = Sha256Hash::from_hex(leaf_hex)?;
    Ok(verify_proof(&expected_root, &leaf, proof))
}
