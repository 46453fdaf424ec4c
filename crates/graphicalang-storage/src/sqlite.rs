//! SQLite-backed implementation of [`ProgramStore`].
//!
//! [`SqliteStore`] keeps one row per key, holding the blob and its blake3
//! content hash. Saving content whose hash matches the stored row is a no-op.
//! On load the hash is recomputed and a mismatch is reported as an
//! [`StorageError::IntegrityError`].

use rusqlite::{params, Connection, OptionalExtension};

use graphicalang_core::Program;

use crate::convert::{from_blob, to_blob};
use crate::error::StorageError;
use crate::hash::hash_blob;
use crate::traits::ProgramStore;
use crate::types::{ProgramSummary, StorageKey};

/// SQLite-backed implementation of [`ProgramStore`].
///
/// The database uses WAL mode; schema changes go through migrations.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) a SQLite database at `path`.
    pub fn new(path: &str) -> Result<Self, StorageError> {
        let conn = crate::schema::open_database(path)?;
        tracing::debug!(path, "opened program database");
        Ok(SqliteStore { conn })
    }

    /// Opens an in-memory SQLite database (for testing).
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = crate::schema::open_in_memory()?;
        Ok(SqliteStore { conn })
    }

    /// Raw blob and stored hash for `key`.
    fn load_row(&self, key: &StorageKey) -> Result<Option<(String, String)>, StorageError> {
        let row = self
            .conn
            .query_row(
                "SELECT blob, content_hash FROM programs WHERE key = ?1",
                params![key.as_str()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        Ok(row)
    }
}

impl ProgramStore for SqliteStore {
    fn load(&self, key: &StorageKey) -> Result<Option<Program>, StorageError> {
        let (blob, stored_hash) = match self.load_row(key)? {
            Some(row) => row,
            None => return Ok(None),
        };

        let actual = hash_blob(&blob).to_hex();
        if actual.as_str() != stored_hash {
            return Err(StorageError::IntegrityError {
                reason: format!(
                    "program {key}: stored hash {stored_hash} does not match content hash {actual}"
                ),
            });
        }

        Ok(Some(from_blob(&blob)?))
    }

    fn save(&mut self, key: &StorageKey, program: &Program) -> Result<(), StorageError> {
        let blob = to_blob(program)?;
        let hash = hash_blob(&blob).to_hex().to_string();

        let tx = self.conn.transaction()?;
        let written = tx.execute(
            "INSERT INTO programs (key, blob, content_hash) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                 blob = excluded.blob,
                 content_hash = excluded.content_hash,
                 updated_at = CURRENT_TIMESTAMP
             WHERE programs.content_hash <> excluded.content_hash",
            params![key.as_str(), blob, hash],
        )?;
        tx.commit()?;

        if written == 0 {
            tracing::debug!(%key, "program unchanged, skipping write");
        } else {
            tracing::debug!(%key, bytes = blob.len(), "program saved");
        }
        Ok(())
    }

    fn delete(&mut self, key: &StorageKey) -> Result<(), StorageError> {
        let tx = self.conn.transaction()?;
        let deleted = tx.execute("DELETE FROM programs WHERE key = ?1", params![key.as_str()])?;
        tx.commit()?;

        if deleted == 0 {
            return Err(StorageError::ProgramNotFound(key.to_string()));
        }
        Ok(())
    }

    fn list(&self) -> Result<Vec<ProgramSummary>, StorageError> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT key, content_hash, length(CAST(blob AS BLOB)) FROM programs ORDER BY key",
        )?;
        let rows = stmt.query_map([], |row| {
            let key: String = row.get(0)?;
            let content_hash: String = row.get(1)?;
            let size: i64 = row.get(2)?;
            Ok(ProgramSummary {
                key: StorageKey(key),
                content_hash,
                size_bytes: usize::try_from(size).unwrap_or(0),
            })
        })?;
        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }
}
