//! Deterministic content hashing for program blobs using blake3.
//!
//! The hash is taken over the blob text, so it follows the arena's insertion
//! order: two equal programs built in a different order may hash differently.
//! Stores use it only to skip rewriting unchanged content and to detect
//! corrupted rows.

use graphicalang_core::Program;

use crate::convert::to_blob;
use crate::error::StorageError;

/// Hashes a serialized blob.
pub fn hash_blob(blob: &str) -> blake3::Hash {
    blake3::hash(blob.as_bytes())
}

/// Hashes the blob a program serializes to.
pub fn hash_program(program: &Program) -> Result<blake3::Hash, StorageError> {
    Ok(hash_blob(&to_blob(program)?))
}
