//! Operator enums for binary expression nodes.
//!
//! The wire format gives every binary operator its own `Expr` variant
//! (`{"type": "add", "lhs": .., "rhs": ..}`). Internally the operators are
//! grouped the same way the evaluator treats them:
//! - [`ArithOp`]: floating-point arithmetic producing any number
//! - [`CmpOp`]: comparisons producing exactly 0 or 1
//! - [`LogicOp`]: C-style truthiness combinators producing exactly 0 or 1

use serde::{Deserialize, Serialize};

/// Binary arithmetic operators. All follow IEEE-754 semantics, so division
/// and modulo by zero produce infinity or NaN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    /// Truncated remainder; the sign follows the dividend.
    Mod,
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// Binary logic operators. Any non-zero operand (NaN included) is true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicOp {
    And,
    Or,
}

/// Any operator taking a `lhs` and a `rhs` operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Arith(ArithOp),
    Compare(CmpOp),
    Logic(LogicOp),
}

impl BinaryOp {
    /// Every binary operator, in editor menu order.
    pub const ALL: [BinaryOp; 13] = [
        BinaryOp::Arith(ArithOp::Add),
        BinaryOp::Arith(ArithOp::Sub),
        BinaryOp::Arith(ArithOp::Mul),
        BinaryOp::Arith(ArithOp::Div),
        BinaryOp::Arith(ArithOp::Mod),
        BinaryOp::Compare(CmpOp::Eq),
        BinaryOp::Compare(CmpOp::Ne),
        BinaryOp::Compare(CmpOp::Lt),
        BinaryOp::Compare(CmpOp::Le),
        BinaryOp::Compare(CmpOp::Gt),
        BinaryOp::Compare(CmpOp::Ge),
        BinaryOp::Logic(LogicOp::And),
        BinaryOp::Logic(LogicOp::Or),
    ];

    /// Whether the operator always yields 0 or 1.
    pub fn is_boolean(self) -> bool {
        !matches!(self, BinaryOp::Arith(_))
    }
}
