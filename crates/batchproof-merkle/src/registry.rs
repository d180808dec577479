//! In-memory registry of Merkle trees keyed by [`TreeId`]
//!
//! The registry is an owned handle rather than process-wide state: create one
//! and pass clones of it to whatever needs it. Clones share the same storage.
//! Every operation holds a single lock for its whole duration, so concurrent
//! operations are linearizable.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use batchproof_types::TreeId;
use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::tree::MerkleTree;

/// Options for constructing a [`TreeRegistry`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryOptions {
    /// Number of trees to reserve room for up front
    pub initial_capacity: usize,
    /// Let `add` overwrite an existing entry instead of failing with
    /// [`Error::TreeExists`]
    pub replace_on_add: bool,
}

/// Thread-safe collection of trees keyed by identifier
///
/// Stored trees are immutable and handed out as shared [`Arc`] handles.
/// There is no eviction; entries live as long as the registry.
#[derive(Debug, Clone)]
pub struct TreeRegistry {
    trees: Arc<RwLock<HashMap<TreeId, Arc<MerkleTree>>>>,
    options: RegistryOptions,
}

impl Default for TreeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeRegistry {
    /// Create an empty registry with default options
    pub fn new() -> Self {
        Self::with_options(RegistryOptions::default())
    }

    /// Create an empty registry with custom options
    pub fn with_options(options: RegistryOptions) -> Self {
        Self {
            trees: Arc::new(RwLock::new(HashMap::with_capacity(options.initial_capacity))),
            options,
        }
    }

    /// Options this registry was created with
    pub fn options(&self) -> &RegistryOptions {
        &self.options
    }

    /// Register a new tree under its own identifier
    ///
    /// # Errors
    /// * [`Error::TreeExists`] if the identifier is taken and
    ///   [`RegistryOptions::replace_on_add`] is not set
    pub fn add(&self, tree: impl Into<Arc<MerkleTree>>) -> Result<()> {
        let tree = tree.into();
        let id = tree.id();

        let mut trees = self.trees.write();
        match trees.entry(id) {
            Entry::Occupied(mut entry) => {
                if !self.options.replace_on_add {
                    return Err(Error::TreeExists(id));
                }
                entry.insert(tree);
                tracing::debug!(tree = %id, "replaced tree on add");
            }
            Entry::Vacant(entry) => {
                entry.insert(tree);
                tracing::debug!(tree = %id, "added tree");
            }
        }
        Ok(())
    }

    /// Look up a tree by identifier
    ///
    /// # Errors
    /// * [`Error::TreeNotFound`] if nothing is registered under `id`
    pub fn get(&self, id: &TreeId) -> Result<Arc<MerkleTree>> {
        self.trees
            .read()
            .get(id)
            .cloned()
            .ok_or(Error::TreeNotFound(*id))
    }

    /// Replace the tree registered under the same identifier, or add it
    ///
    /// Returns the tree previously registered under that identifier, if any.
    pub fn update(&self, tree: impl Into<Arc<MerkleTree>>) -> Option<Arc<MerkleTree>> {
        let tree = tree.into();
        let id = tree.id();

        let previous = self.trees.write().insert(id, tree);
        match &previous {
            Some(_) => tracing::debug!(tree = %id, "updated tree"),
            None => tracing::debug!(tree = %id, "added tree on update"),
        }
        previous
    }

    /// Whether a tree is registered under `id`
    pub fn contains(&self, id: &TreeId) -> bool {
        self.trees.read().contains_key(id)
    }

    /// Number of registered trees
    pub fn len(&self) -> usize {
        self.trees.read().len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.trees.read().is_empty()
    }

    /// Identifiers of all registered trees, in no particular order
    pub fn ids(&self) -> Vec<TreeId> {
        self.trees.read().keys().copied().collect()
    }
}
