//! Core error types for graphicalang-core.
//!
//! The program model itself never fails: holes and dangling ids are a normal
//! state. The only fallible surface is turning an editor-supplied tag string
//! into a node kind.

use thiserror::Error;

/// Core errors produced by the graphicalang-core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The tag does not name any expression variant.
    #[error("unknown expression kind: '{name}'")]
    UnknownExprKind { name: String },

    /// The tag does not name any statement variant.
    #[error("unknown statement kind: '{name}'")]
    UnknownStatKind { name: String },
}
