//! Storage error types for graphicalang-storage.
//!
//! [`StorageError`] covers all anticipated failure modes in the storage layer:
//! serialization, SQLite and migration failures, missing keys and blobs whose
//! content no longer matches their recorded hash.

use graphicalang_core::ExprId;
use thiserror::Error;

/// Errors produced by storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The program holds a constant JSON cannot represent (NaN or infinity).
    #[error("constant at expression {expr} is not finite")]
    NonFiniteConstant { expr: ExprId },

    /// An underlying SQLite call failed.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Applying schema migrations failed.
    #[error("migration error: {0}")]
    Migration(String),

    /// No program is stored under the given key.
    #[error("program not found: {0}")]
    ProgramNotFound(String),

    /// A data integrity violation was detected.
    #[error("integrity error: {reason}")]
    IntegrityError { reason: String },
}
