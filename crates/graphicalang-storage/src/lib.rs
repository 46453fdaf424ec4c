//! Persistence for graphicalang programs.
//!
//! A program is stored whole, as a JSON text blob under a host-chosen
//! [`StorageKey`]. The [`ProgramStore`] trait is the storage contract; the
//! [`InMemoryStore`] and [`SqliteStore`] are first-class backends.
//!
//! # Modules
//!
//! - [`error`]: StorageError enum with all failure modes
//! - [`types`]: StorageKey, ProgramSummary storage-layer types
//! - [`traits`]: ProgramStore trait definition
//! - [`convert`]: Program to blob and back
//! - [`hash`]: blake3 content hashing
//! - [`memory`]: InMemoryStore implementation
//! - [`schema`]: migrations and database setup
//! - [`sqlite`]: SqliteStore implementation

pub mod convert;
pub mod error;
pub mod hash;
pub mod memory;
pub mod schema;
pub mod sqlite;
pub mod traits;
pub mod types;

// Re-export key types for ergonomic use.
pub use convert::{from_blob, to_blob, to_blob_pretty};
pub use error::StorageError;
pub use hash::{hash_blob, hash_program};
pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;
pub use traits::ProgramStore;
pub use types::{ProgramSummary, StorageKey};
