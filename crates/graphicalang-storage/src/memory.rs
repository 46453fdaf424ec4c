//! In-memory implementation of [`ProgramStore`].
//!
//! [`InMemoryStore`] is a first-class backend for tests and for hosts that
//! don't need persistence. It keeps serialized blobs, not live programs, so
//! loading goes through the same decoding path as the SQLite backend.

use std::collections::HashMap;

use graphicalang_core::Program;

use crate::convert::{from_blob, to_blob};
use crate::error::StorageError;
use crate::hash::hash_blob;
use crate::traits::ProgramStore;
use crate::types::{ProgramSummary, StorageKey};

#[derive(Debug, Clone)]
struct StoredBlob {
    blob: String,
    hash: blake3::Hash,
}

/// HashMap-backed program store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    programs: HashMap<StorageKey, StoredBlob>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        InMemoryStore::default()
    }

    /// Raw blob stored under `key`.
    pub fn blob(&self, key: &StorageKey) -> Option<&str> {
        self.programs.get(key).map(|stored| stored.blob.as_str())
    }
}

impl ProgramStore for InMemoryStore {
    fn load(&self, key: &StorageKey) -> Result<Option<Program>, StorageError> {
        match self.programs.get(key) {
            Some(stored) => Ok(Some(from_blob(&stored.blob)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, key: &StorageKey, program: &Program) -> Result<(), StorageError> {
        let blob = to_blob(program)?;
        let hash = hash_blob(&blob);
        if self.programs.get(key).map(|stored| stored.hash) == Some(hash) {
            tracing::debug!(%key, "program unchanged, skipping write");
            return Ok(());
        }
        self.programs.insert(key.clone(), StoredBlob { blob, hash });
        Ok(())
    }

    fn delete(&mut self, key: &StorageKey) -> Result<(), StorageError> {
        self.programs
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| StorageError::ProgramNotFound(key.to_string()))
    }

    fn list(&self) -> Result<Vec<ProgramSummary>, StorageError> {
        let mut summaries: Vec<ProgramSummary> = self
            .programs
            .iter()
            .map(|(key, stored)| ProgramSummary {
                key: key.clone(),
                content_hash: stored.hash.to_hex().to_string(),
                size_bytes: stored.blob.len(),
            })
            .collect();
        summaries.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(summaries)
    }
}
