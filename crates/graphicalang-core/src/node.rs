//! Expression and statement node types.
//!
//! Nodes never hold their children directly. Every child is an id into one of
//! the [`Program`](crate::program::Program) arenas, so a child may be missing
//! (a hole) without the parent being invalid.
//!
//! Both enums are internally tagged by a `"type"` field so the persisted blob
//! reads `{"type": "while", "cond": "3", "body": "1"}`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::id::{ExprId, StatListId};
use crate::ops::{ArithOp, BinaryOp, CmpOp, LogicOp};

/// An expression node. Evaluates to a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Expr {
    Const { value: f64 },
    Var { name: String },
    Add { lhs: ExprId, rhs: ExprId },
    Sub { lhs: ExprId, rhs: ExprId },
    Mul { lhs: ExprId, rhs: ExprId },
    Div { lhs: ExprId, rhs: ExprId },
    Mod { lhs: ExprId, rhs: ExprId },
    Eq { lhs: ExprId, rhs: ExprId },
    Neq { lhs: ExprId, rhs: ExprId },
    Lt { lhs: ExprId, rhs: ExprId },
    Lte { lhs: ExprId, rhs: ExprId },
    Gt { lhs: ExprId, rhs: ExprId },
    Gte { lhs: ExprId, rhs: ExprId },
    And { lhs: ExprId, rhs: ExprId },
    Or { lhs: ExprId, rhs: ExprId },
    Not { expr: ExprId },
}

impl Expr {
    /// Builds the variant for a binary operator.
    pub fn binary(op: BinaryOp, lhs: ExprId, rhs: ExprId) -> Expr {
        match op {
            BinaryOp::Arith(ArithOp::Add) => Expr::Add { lhs, rhs },
            BinaryOp::Arith(ArithOp::Sub) => Expr::Sub { lhs, rhs },
            BinaryOp::Arith(ArithOp::Mul) => Expr::Mul { lhs, rhs },
            BinaryOp::Arith(ArithOp::Div) => Expr::Div { lhs, rhs },
            BinaryOp::Arith(ArithOp::Mod) => Expr::Mod { lhs, rhs },
            BinaryOp::Compare(CmpOp::Eq) => Expr::Eq { lhs, rhs },
            BinaryOp::Compare(CmpOp::Ne) => Expr::Neq { lhs, rhs },
            BinaryOp::Compare(CmpOp::Lt) => Expr::Lt { lhs, rhs },
            BinaryOp::Compare(CmpOp::Le) => Expr::Lte { lhs, rhs },
            BinaryOp::Compare(CmpOp::Gt) => Expr::Gt { lhs, rhs },
            BinaryOp::Compare(CmpOp::Ge) => Expr::Gte { lhs, rhs },
            BinaryOp::Logic(LogicOp::And) => Expr::And { lhs, rhs },
            BinaryOp::Logic(LogicOp::Or) => Expr::Or { lhs, rhs },
        }
    }

    /// Splits a binary node into its operator and operand ids.
    ///
    /// Returns `None` for `const`, `var` and `not`.
    pub fn as_binary(&self) -> Option<(BinaryOp, &ExprId, &ExprId)> {
        let op = self.kind().binary_op()?;
        match self {
            Expr::Add { lhs, rhs }
            | Expr::Sub { lhs, rhs }
            | Expr::Mul { lhs, rhs }
            | Expr::Div { lhs, rhs }
            | Expr::Mod { lhs, rhs }
            | Expr::Eq { lhs, rhs }
            | Expr::Neq { lhs, rhs }
            | Expr::Lt { lhs, rhs }
            | Expr::Lte { lhs, rhs }
            | Expr::Gt { lhs, rhs }
            | Expr::Gte { lhs, rhs }
            | Expr::And { lhs, rhs }
            | Expr::Or { lhs, rhs } => Some((op, lhs, rhs)),
            Expr::Const { .. } | Expr::Var { .. } | Expr::Not { .. } => None,
        }
    }

    pub fn kind(&self) -> ExprKind {
        match self {
            Expr::Const { .. } => ExprKind::Const,
            Expr::Var { .. } => ExprKind::Var,
            Expr::Add { .. } => ExprKind::Add,
            Expr::Sub { .. } => ExprKind::Sub,
            Expr::Mul { .. } => ExprKind::Mul,
            Expr::Div { .. } => ExprKind::Div,
            Expr::Mod { .. } => ExprKind::Mod,
            Expr::Eq { .. } => ExprKind::Eq,
            Expr::Neq { .. } => ExprKind::Neq,
            Expr::Lt { .. } => ExprKind::Lt,
            Expr::Lte { .. } => ExprKind::Lte,
            Expr::Gt { .. } => ExprKind::Gt,
            Expr::Gte { .. } => ExprKind::Gte,
            Expr::And { .. } => ExprKind::And,
            Expr::Or { .. } => ExprKind::Or,
            Expr::Not { .. } => ExprKind::Not,
        }
    }

    /// Operand ids referenced by this node, left to right.
    pub fn children(&self) -> Vec<&ExprId> {
        match self {
            Expr::Const { .. } | Expr::Var { .. } => Vec::new(),
            Expr::Not { expr } => vec![expr],
            other => match other.as_binary() {
                Some((_, lhs, rhs)) => vec![lhs, rhs],
                None => Vec::new(),
            },
        }
    }
}

/// A statement node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Stat {
    /// Writes the value of `value` to the variable `name`.
    Assign { name: String, value: ExprId },
    /// Walks `body1` when `cond` is non-zero, `body2` otherwise.
    If {
        cond: ExprId,
        body1: StatListId,
        body2: StatListId,
    },
    /// Walks `body` for as long as `cond` is non-zero.
    While { cond: ExprId, body: StatListId },
    /// Declares a pause of `value` time units. Does not touch variables.
    Sleep { value: ExprId },
}

impl Stat {
    pub fn kind(&self) -> StatKind {
        match self {
            Stat::Assign { .. } => StatKind::Assign,
            Stat::If { .. } => StatKind::If,
            Stat::While { .. } => StatKind::While,
            Stat::Sleep { .. } => StatKind::Sleep,
        }
    }

    /// Expression ids referenced by this statement.
    pub fn expr_ids(&self) -> Vec<&ExprId> {
        match self {
            Stat::Assign { value, .. } | Stat::Sleep { value } => vec![value],
            Stat::If { cond, .. } | Stat::While { cond, .. } => vec![cond],
        }
    }

    /// Statement list ids referenced by this statement.
    pub fn stat_list_ids(&self) -> Vec<&StatListId> {
        match self {
            Stat::Assign { .. } | Stat::Sleep { .. } => Vec::new(),
            Stat::If { body1, body2, .. } => vec![body1, body2],
            Stat::While { body, .. } => vec![body],
        }
    }
}

/// The tag of an [`Expr`] variant, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExprKind {
    Const,
    Var,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    And,
    Or,
    Not,
}

impl ExprKind {
    pub const ALL: [ExprKind; 16] = [
        ExprKind::Const,
        ExprKind::Var,
        ExprKind::Add,
        ExprKind::Sub,
        ExprKind::Mul,
        ExprKind::Div,
        ExprKind::Mod,
        ExprKind::Eq,
        ExprKind::Neq,
        ExprKind::Lt,
        ExprKind::Lte,
        ExprKind::Gt,
        ExprKind::Gte,
        ExprKind::And,
        ExprKind::Or,
        ExprKind::Not,
    ];

    /// The wire tag.
    pub fn as_str(self) -> &'static str {
        match self {
            ExprKind::Const => "const",
            ExprKind::Var => "var",
            ExprKind::Add => "add",
            ExprKind::Sub => "sub",
            ExprKind::Mul => "mul",
            ExprKind::Div => "div",
            ExprKind::Mod => "mod",
            ExprKind::Eq => "eq",
            ExprKind::Neq => "neq",
            ExprKind::Lt => "lt",
            ExprKind::Lte => "lte",
            ExprKind::Gt => "gt",
            ExprKind::Gte => "gte",
            ExprKind::And => "and",
            ExprKind::Or => "or",
            ExprKind::Not => "not",
        }
    }

    /// The operator for binary kinds, `None` for leaves and `not`.
    pub fn binary_op(self) -> Option<BinaryOp> {
        let op = match self {
            ExprKind::Add => BinaryOp::Arith(ArithOp::Add),
            ExprKind::Sub => BinaryOp::Arith(ArithOp::Sub),
            ExprKind::Mul => BinaryOp::Arith(ArithOp::Mul),
            ExprKind::Div => BinaryOp::Arith(ArithOp::Div),
            ExprKind::Mod => BinaryOp::Arith(ArithOp::Mod),
            ExprKind::Eq => BinaryOp::Compare(CmpOp::Eq),
            ExprKind::Neq => BinaryOp::Compare(CmpOp::Ne),
            ExprKind::Lt => BinaryOp::Compare(CmpOp::Lt),
            ExprKind::Lte => BinaryOp::Compare(CmpOp::Le),
            ExprKind::Gt => BinaryOp::Compare(CmpOp::Gt),
            ExprKind::Gte => BinaryOp::Compare(CmpOp::Ge),
            ExprKind::And => BinaryOp::Logic(LogicOp::And),
            ExprKind::Or => BinaryOp::Logic(LogicOp::Or),
            ExprKind::Const | ExprKind::Var | ExprKind::Not => return None,
        };
        Some(op)
    }
}

impl fmt::Display for ExprKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExprKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExprKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CoreError::UnknownExprKind { name: s.to_string() })
    }
}

/// The tag of a [`Stat`] variant, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKind {
    Assign,
    If,
    While,
    Sleep,
}

impl StatKind {
    pub const ALL: [StatKind; 4] = [StatKind::Assign, StatKind::If, StatKind::While, StatKind::Sleep];

    /// The wire tag.
    pub fn as_str(self) -> &'static str {
        match self {
            StatKind::Assign => "assign",
            StatKind::If => "if",
            StatKind::While => "while",
            StatKind::Sleep => "sleep",
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CoreError::UnknownStatKind { name: s.to_string() })
    }
}
