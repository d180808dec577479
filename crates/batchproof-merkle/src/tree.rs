//! Merkle tree construction
//!
//! Nodes live in an arena owned by the tree. Leaves occupy the first
//! `leaf_count` slots in input order; every internal node refers to its two
//! children by arena index. When a level has an odd number of nodes, the
//! last node is paired with itself: the parent stores the same index for
//! both children, and its hash is `hash_pair(h, h)`.

use batchproof_types::{Sha256Hash, TreeId};

use crate::error::{Error, Result};
use crate::hash::{hash_content, hash_pair};
use crate::proof::{create_proof, Proof};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    hash: Sha256Hash,
    children: Option<(usize, usize)>,
}

/// An immutable binary Merkle tree identified by a [`TreeId`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    id: TreeId,
    nodes: Vec<Node>,
    root: usize,
    leaf_count: usize,
    height: u32,
}

/// Borrowed view of one node of a [`MerkleTree`]
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a MerkleTree,
    index: usize,
}

impl<'a> NodeRef<'a> {
    /// Hash stored at this node
    pub fn hash(&self) -> &'a Sha256Hash {
        &self.tree.nodes[self.index].hash
    }

    /// Arena index of this node within its tree
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether this node is a leaf (has no children)
    pub fn is_leaf(&self) -> bool {
        self.tree.nodes[self.index].children.is_none()
    }

    /// Left and right children, or `None` for a leaf
    ///
    /// Both children are the same node when this parent was produced by
    /// pairing the last node of an odd-sized level with itself.
    pub fn children(&self) -> Option<(NodeRef<'a>, NodeRef<'a>)> {
        self.tree.nodes[self.index].children.map(|(left, right)| {
            (
                NodeRef {
                    tree: self.tree,
                    index: left,
                },
                NodeRef {
                    tree: self.tree,
                    index: right,
                },
            )
        })
    }

    /// Left child, or `None` for a leaf
    pub fn left(&self) -> Option<NodeRef<'a>> {
        self.children().map(|(left, _)| left)
    }

    /// Right child, or `None` for a leaf
    pub fn right(&self) -> Option<NodeRef<'a>> {
        self.children().map(|(_, right)| right)
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl Eq for NodeRef<'_> {}

impl MerkleTree {
    /// Build a tree from an ordered, non-empty list of leaf hashes
    ///
    /// Leaves are used as given; they are not hashed again.
    pub fn new(id: TreeId, leaves: &[Sha256Hash]) -> Result<Self> {
        if leaves.is_empty() {
            return Err(Error::EmptyInput);
        }

        let leaf_count = leaves.len();
        let mut nodes = Vec::with_capacity(2 * leaf_count);
        nodes.extend(leaves.iter().map(|hash| Node {
            hash: *hash,
            children: None,
        }));

        let mut level: Vec<usize> = (0..leaf_count).collect();
        let mut height = 0;

        while level.len() > 1 {
            if level.len() % 2 != 0 {
                let last = level[level.len() - 1];
                level.push(last);
            }

            let mut next = Vec::with_capacity(level.len() / 2);
            for pair in level.chunks_exact(2) {
                let (left, right) = (pair[0], pair[1]);
                let hash = hash_pair(&nodes[left].hash, &nodes[right].hash);
                nodes.push(Node {
                    hash,
                    children: Some((left, right)),
                });
                next.push(nodes.len() - 1);
            }

            height += 1;
            tracing::trace!(tree = %id, height, width = next.len(), "built tree level");
            level = next;
        }

        let root = level[0];
        tracing::debug!(
            tree = %id,
            leaves = leaf_count,
            height,
            root = %nodes[root].hash,
            "built merkle tree"
        );

        Ok(Self {
            id,
            nodes,
            root,
            leaf_count,
            height,
        })
    }

    /// Hash each content item with SHA-256 and build a tree from the results
    pub fn from_contents<I, T>(id: TreeId, contents: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let leaves: Vec<Sha256Hash> = contents
            .into_iter()
            .map(|content| hash_content(content.as_ref()))
            .collect();
        Self::new(id, &leaves)
    }

    /// Identifier of this tree
    pub fn id(&self) -> TreeId {
        self.id
    }

    /// Root node
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            index: self.root,
        }
    }

    /// Root hash
    pub fn root_hash(&self) -> Sha256Hash {
        self.nodes[self.root].hash
    }

    /// Number of leaves supplied at construction (synthetic duplicates excluded)
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Number of levels above the leaves; `ceil(log2(leaf_count))`
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of distinct nodes stored in the tree
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Leaf hashes in input order
    pub fn leaves(&self) -> impl ExactSizeIterator<Item = &Sha256Hash> + '_ {
        self.nodes[..self.leaf_count].iter().map(|node| &node.hash)
    }

    /// Whether any leaf carries `hash`
    pub fn contains_leaf(&self, hash: &Sha256Hash) -> bool {
        self.leaves().any(|leaf| leaf == hash)
    }

    /// Create an inclusion proof for the leaf carrying `target`
    ///
    /// See [`create_proof`].
    pub fn prove(&self, target: &Sha256Hash) -> Result<Proof> {
        create_proof(self, target)
    }
}

/// Build a tree under a freshly generated identifier
pub fn build_tree(leaves: &[Sha256Hash]) -> Result<MerkleTree> {
    MerkleTree::new(TreeId::new_v4(), leaves)
}

/// Build a tree under the given identifier
pub fn build_tree_with_id(id: TreeId, leaves: &[Sha256Hash]) -> Result<MerkleTree> {
    MerkleTree::new(id, leaves)
}
