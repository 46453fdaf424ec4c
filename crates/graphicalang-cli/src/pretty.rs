//! Text rendering of a program as an indented statement tree.
//!
//! Every statement is prefixed with its id in brackets so it can be passed
//! back to the editing subcommands. Holes print as `_`. Lists and
//! expressions that (directly or indirectly) contain themselves print as
//! `...` at the point of recursion.

use std::collections::HashSet;
use std::fmt::Write;

use graphicalang_core::ops::{ArithOp, BinaryOp, CmpOp, LogicOp};
use graphicalang_core::{Expr, ExprId, Program, Stat, StatListId};

const INDENT: &str = "  ";

/// Renders the whole program, starting at the entry list.
pub fn format_program(program: &Program) -> String {
    let mut out = String::new();
    let mut open = HashSet::new();
    write_list(program, &StatListId::entry(), 0, &mut open, &mut out);
    out
}

/// Renders one expression inline, e.g. `(x + 1)`.
pub fn format_expr(program: &Program, id: &ExprId) -> String {
    let mut out = String::new();
    let mut open = HashSet::new();
    write_expr(program, id, &mut open, &mut out);
    out
}

fn write_list<'p>(
    program: &'p Program,
    list_id: &'p StatListId,
    depth: usize,
    open: &mut HashSet<&'p StatListId>,
    out: &mut String,
) {
    let pad = INDENT.repeat(depth);
    let stats = match program.stat_list(list_id) {
        Some(stats) => stats,
        None => {
            let _ = writeln!(out, "{pad}<missing list {list_id}>");
            return;
        }
    };
    if !open.insert(list_id) {
        let _ = writeln!(out, "{pad}...");
        return;
    }

    for stat_id in stats {
        let stat = match program.stat(stat_id) {
            Some(stat) => stat,
            None => {
                let _ = writeln!(out, "{pad}[{stat_id}] _");
                continue;
            }
        };
        match stat {
            Stat::Assign { name, value } => {
                let value = format_expr(program, value);
                let _ = writeln!(out, "{pad}[{stat_id}] {name} := {value}");
            }
            Stat::If { cond, body1, body2 } => {
                let cond = format_expr(program, cond);
                let _ = writeln!(out, "{pad}[{stat_id}] if {cond} ({body1})");
                write_list(program, body1, depth + 1, open, out);
                let _ = writeln!(out, "{pad}else ({body2})");
                write_list(program, body2, depth + 1, open, out);
            }
            Stat::While { cond, body } => {
                let cond = format_expr(program, cond);
                let _ = writeln!(out, "{pad}[{stat_id}] while {cond} ({body})");
                write_list(program, body, depth + 1, open, out);
            }
            Stat::Sleep { value } => {
                let value = format_expr(program, value);
                let _ = writeln!(out, "{pad}[{stat_id}] sleep {value}");
            }
        }
    }

    open.remove(list_id);
}

fn write_expr<'p>(
    program: &'p Program,
    id: &'p ExprId,
    open: &mut HashSet<&'p ExprId>,
    out: &mut String,
) {
    let expr = match program.expr(id) {
        Some(expr) => expr,
        None => {
            out.push('_');
            return;
        }
    };
    if !open.insert(id) {
        out.push_str("...");
        return;
    }

    match expr {
        Expr::Const { value } => {
            let _ = write!(out, "{value}");
        }
        Expr::Var { name } => out.push_str(name),
        Expr::Not { expr } => {
            out.push_str("not ");
            write_expr(program, expr, open, out);
        }
        other => {
            if let Some((op, lhs, rhs)) = other.as_binary() {
                out.push('(');
                write_expr(program, lhs, open, out);
                let _ = write!(out, " {} ", symbol(op));
                write_expr(program, rhs, open, out);
                out.push(')');
            }
        }
    }

    open.remove(id);
}

fn symbol(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Arith(ArithOp::Add) => "+",
        BinaryOp::Arith(ArithOp::Sub) => "-",
        BinaryOp::Arith(ArithOp::Mul) => "*",
        BinaryOp::Arith(ArithOp::Div) => "/",
        BinaryOp::Arith(ArithOp::Mod) => "%",
        BinaryOp::Compare(CmpOp::Eq) => "==",
        BinaryOp::Compare(CmpOp::Ne) => "!=",
        BinaryOp::Compare(CmpOp::Lt) => "<",
        BinaryOp::Compare(CmpOp::Le) => "<=",
        BinaryOp::Compare(CmpOp::Gt) => ">",
        BinaryOp::Compare(CmpOp::Ge) => ">=",
        BinaryOp::Logic(LogicOp::And) => "and",
        BinaryOp::Logic(LogicOp::Or) => "or",
    }
}
