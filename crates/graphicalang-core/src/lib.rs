//! Program model for graphicalang block programs.
//!
//! - [`id`]: string-backed id newtypes for expressions, statements and lists
//! - [`node`]: the [`Expr`] and [`Stat`] node enums and their kind tags
//! - [`ops`]: operator grouping used by the evaluator
//! - [`program`]: the [`Program`] arena and its mutation protocol
//! - [`error`]: [`CoreError`]

pub mod error;
pub mod id;
pub mod node;
pub mod ops;
pub mod program;

// Re-export commonly used types
pub use error::CoreError;
pub use id::{ExprId, StatId, StatListId};
pub use node::{Expr, ExprKind, Stat, StatKind};
pub use ops::{ArithOp, BinaryOp, CmpOp, LogicOp};
pub use program::Program;
