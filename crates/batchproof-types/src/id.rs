//! Tree identifiers

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Identifier of a Merkle tree, one per upload batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TreeId(Uuid);

impl TreeId {
    /// Generate a fresh random (v4) identifier
    pub fn new_v4() -> Self {
        TreeId(Uuid::new_v4())
    }

    /// Wrap an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        TreeId(uuid)
    }

    /// Parse from the hyphenated (or simple) UUID text form
    pub fn parse(s: &str) -> Result<Self> {
        Uuid::parse_str(s)
            .map(TreeId)
            .map_err(|e| Error::InvalidEncoding(format!("invalid tree id: {}", e)))
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for TreeId {
    fn from(uuid: Uuid) -> Self {
        TreeId(uuid)
    }
}

impl std::str::FromStr for TreeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for TreeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
