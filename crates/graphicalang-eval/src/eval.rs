//! Expression evaluation.
//!
//! [`evaluate`] is total: every expression, including a hole or a read of an
//! unset variable, produces a number. Arithmetic follows IEEE-754, so
//! division by zero yields infinity or NaN instead of trapping.
//!
//! Both operands of every binary node are always evaluated; `and` and `or`
//! do not short-circuit.
//!
//! Expressions are addressed by id, so a node can reach itself (e.g. a `not`
//! whose operand id is its own). Re-entering an expression that is still
//! being evaluated reads as a hole.

use std::collections::HashSet;

use graphicalang_core::ops::{ArithOp, BinaryOp, CmpOp, LogicOp};
use graphicalang_core::{Expr, ExprId, Program};

use crate::bindings::Bindings;

/// Evaluates the expression stored at `expr_id`.
///
/// - a hole evaluates to 0
/// - an unset variable evaluates to NaN, which is truthy (it is not 0)
/// - comparisons and logic operators yield exactly 0 or 1
/// - a cyclic reference evaluates to 0 at the point it closes
pub fn evaluate(program: &Program, expr_id: &ExprId, bindings: &Bindings) -> f64 {
    let mut open = HashSet::new();
    eval_node(program, expr_id, bindings, &mut open)
}

fn eval_node<'p>(
    program: &'p Program,
    expr_id: &'p ExprId,
    bindings: &Bindings,
    open: &mut HashSet<&'p ExprId>,
) -> f64 {
    let expr = match program.expr(expr_id) {
        Some(expr) => expr,
        None => return 0.0,
    };
    if !open.insert(expr_id) {
        return 0.0;
    }

    let value = match expr {
        Expr::Const { value } => *value,
        Expr::Var { name } => bindings.get(name).unwrap_or(f64::NAN),
        Expr::Not { expr } => bool_to_num(!is_truthy(eval_node(program, expr, bindings, open))),
        other => match other.as_binary() {
            Some((op, lhs, rhs)) => {
                let lhs = eval_node(program, lhs, bindings, open);
                let rhs = eval_node(program, rhs, bindings, open);
                eval_binary(op, lhs, rhs)
            }
            None => 0.0,
        },
    };

    open.remove(expr_id);
    value
}

/// C-style truthiness: anything but 0 (and -0) is true, NaN included.
pub fn is_truthy(value: f64) -> bool {
    value != 0.0
}

/// Applies a binary operator to two already evaluated operands.
pub fn eval_binary(op: BinaryOp, lhs: f64, rhs: f64) -> f64 {
    match op {
        BinaryOp::Arith(op) => eval_arith(op, lhs, rhs),
        BinaryOp::Compare(op) => bool_to_num(eval_compare(op, lhs, rhs)),
        BinaryOp::Logic(op) => bool_to_num(eval_logic(op, lhs, rhs)),
    }
}

fn eval_arith(op: ArithOp, lhs: f64, rhs: f64) -> f64 {
    match op {
        ArithOp::Add => lhs + rhs,
        ArithOp::Sub => lhs - rhs,
        ArithOp::Mul => lhs * rhs,
        ArithOp::Div => lhs / rhs,
        ArithOp::Mod => lhs % rhs,
    }
}

// NaN compares false against everything except `Ne`.
fn eval_compare(op: CmpOp, lhs: f64, rhs: f64) -> bool {
    match op {
        CmpOp::Eq => lhs == rhs,
        CmpOp::Ne => lhs != rhs,
        CmpOp::Lt => lhs < rhs,
        CmpOp::Le => lhs <= rhs,
        CmpOp::Gt => lhs > rhs,
        CmpOp::Ge => lhs >= rhs,
    }
}

fn eval_logic(op: LogicOp, lhs: f64, rhs: f64) -> bool {
    match op {
        LogicOp::And => is_truthy(lhs) && is_truthy(rhs),
        LogicOp::Or => is_truthy(lhs) || is_truthy(rhs),
    }
}

fn bool_to_num(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}
