//! CLI error type and its mapping to exit codes.

use graphicalang_core::CoreError;
use graphicalang_storage::StorageError;
use thiserror::Error;

/// Errors surfaced by the `graphicalang` binary.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("no statement list with id {0}")]
    UnknownList(String),

    #[error("no statement with id {0}")]
    UnknownStat(String),

    #[error("statement {0} is not an assignment")]
    NotAnAssignment(String),

    #[error("list {list} has no item at index {index}")]
    IndexOutOfRange { list: String, index: usize },

    #[error("constant value must be finite, got {0}")]
    NonFiniteValue(f64),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("run task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl CliError {
    /// 1 for usage and model errors, 3 for storage and I/O failures.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Storage(_) | CliError::Io(_) | CliError::Task(_) => 3,
            _ => 1,
        }
    }
}
