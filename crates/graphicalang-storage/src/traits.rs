//! The [`ProgramStore`] trait defining the storage contract for programs.
//!
//! A program is persisted whole, as one text blob under a [`StorageKey`].
//! There is no partial save: every `save` replaces the blob.
//!
//! All backends ([`InMemoryStore`](crate::InMemoryStore),
//! [`SqliteStore`](crate::SqliteStore)) implement this trait and are
//! swappable without changing the host.

use graphicalang_core::Program;

use crate::error::StorageError;
use crate::types::{ProgramSummary, StorageKey};

/// The storage contract for programs.
///
/// The trait is synchronous. Hosts that drive a program on another thread
/// save a clone, not the running copy.
pub trait ProgramStore {
    /// Loads the program stored under `key`, or `None` when nothing is.
    fn load(&self, key: &StorageKey) -> Result<Option<Program>, StorageError>;

    /// Stores `program` under `key`, replacing any previous blob.
    fn save(&mut self, key: &StorageKey, program: &Program) -> Result<(), StorageError>;

    /// Removes the program stored under `key`.
    ///
    /// Fails with [`StorageError::ProgramNotFound`] when nothing is stored.
    fn delete(&mut self, key: &StorageKey) -> Result<(), StorageError>;

    /// Lists stored programs, ordered by key.
    fn list(&self) -> Result<Vec<ProgramSummary>, StorageError>;

    /// Loads the program under `key`, starting from an empty one when the
    /// key is absent.
    fn load_or_empty(&self, key: &StorageKey) -> Result<Program, StorageError> {
        Ok(self.load(key)?.unwrap_or_default())
    }

    /// Like [`load`](ProgramStore::load), but a missing key is an error.
    fn load_existing(&self, key: &StorageKey) -> Result<Program, StorageError> {
        self.load(key)?
            .ok_or_else(|| StorageError::ProgramNotFound(key.to_string()))
    }
}
