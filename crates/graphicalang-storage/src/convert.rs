//! Conversions between [`Program`] and its persisted text blob.
//!
//! The blob is the JSON rendering of the program arena, with the field names
//! `stats`, `exprs`, `statLists`, `statCount`, `exprCount` and
//! `statListCount`. It deserializes back to an equal value.

use graphicalang_core::{Expr, Program};

use crate::error::StorageError;

/// Serializes a program to its compact blob.
///
/// Fails on non-finite constants, which JSON would silently turn into `null`.
pub fn to_blob(program: &Program) -> Result<String, StorageError> {
    check_finite(program)?;
    Ok(serde_json::to_string(program)?)
}

/// Like [`to_blob`], indented for humans.
pub fn to_blob_pretty(program: &Program) -> Result<String, StorageError> {
    check_finite(program)?;
    Ok(serde_json::to_string_pretty(program)?)
}

/// Parses a blob produced by [`to_blob`] (or by any host writing the same
/// document shape).
pub fn from_blob(blob: &str) -> Result<Program, StorageError> {
    Ok(serde_json::from_str(blob)?)
}

fn check_finite(program: &Program) -> Result<(), StorageError> {
    for (id, expr) in program.exprs() {
        if let Expr::Const { value } = expr {
            if !value.is_finite() {
                return Err(StorageError::NonFiniteConstant { expr: id.clone() });
            }
        }
    }
    Ok(())
}
