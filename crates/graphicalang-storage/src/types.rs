//! Storage-layer types for program identity and metadata.
//!
//! Programs are addressed by a host-chosen [`StorageKey`]. Bumping the key
//! (e.g. a `-v2` suffix) is how a host versions the blob format.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Key a program blob is stored under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageKey(pub String);

impl StorageKey {
    /// The key used when the host does not pick one.
    pub const DEFAULT: &'static str = "graphicalang-program-v1";

    pub fn new(key: impl Into<String>) -> Self {
        StorageKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for StorageKey {
    fn default() -> Self {
        StorageKey::new(Self::DEFAULT)
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Summary of a stored program (for listing).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramSummary {
    pub key: StorageKey,
    /// blake3 hash of the blob, hex encoded.
    pub content_hash: String,
    /// Length of the blob in bytes.
    pub size_bytes: usize,
}
