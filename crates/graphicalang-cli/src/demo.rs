//! A small sample program, built through the editor operations.
//!
//! ```text
//! x := 0
//! while x < 200
//!   x := x + 10
//!   angle := angle + 15
//!   if x % 50 == 0
//!     y := y + 20
//!   sleep 50
//! ```

use graphicalang_core::{Expr, ExprId, ExprKind, Program, Stat, StatKind, StatListId};

/// Fills the slot `id` with `kind` and returns its operand slots.
fn fill(program: &mut Program, id: ExprId, kind: ExprKind) -> Vec<ExprId> {
    let expr = program.expr_from_type(kind);
    let children = expr.children().into_iter().cloned().collect();
    program.set_expr(id, Some(expr));
    children
}

fn constant(program: &mut Program, id: ExprId, value: f64) {
    program.set_expr(id, Some(Expr::Const { value }));
}

fn read(program: &mut Program, id: ExprId, name: &str) {
    program.set_expr(id, Some(Expr::Var { name: name.into() }));
}

/// `name := name + step`, appended to `list`.
fn increment(program: &mut Program, list: &StatListId, name: &str, step: f64) {
    let value = program.allocate_expr_id();
    let id = program.register_stat(Stat::Assign {
        name: name.into(),
        value: value.clone(),
    });
    program.append_stat_list(list, id);
    let operands = fill(program, value, ExprKind::Add);
    read(program, operands[0].clone(), name);
    constant(program, operands[1].clone(), step);
}

pub fn demo_program() -> Program {
    let mut program = Program::new();
    let entry = StatListId::entry();

    let init = program.stat_from_type(StatKind::Assign);
    let init_value = init.expr_ids()[0].clone();
    let init_id = program.register_stat(init);
    program.append_stat_list(&entry, init_id);
    constant(&mut program, init_value, 0.0);

    let w = program.stat_from_type(StatKind::While);
    let (cond, body) = (w.expr_ids()[0].clone(), w.stat_list_ids()[0].clone());
    let w_id = program.register_stat(w);
    program.append_stat_list(&entry, w_id);
    let operands = fill(&mut program, cond, ExprKind::Lt);
    read(&mut program, operands[0].clone(), "x");
    constant(&mut program, operands[1].clone(), 200.0);

    increment(&mut program, &body, "x", 10.0);
    increment(&mut program, &body, "angle", 15.0);

    let branch = program.stat_from_type(StatKind::If);
    let (cond, then) = (branch.expr_ids()[0].clone(), branch.stat_list_ids()[0].clone());
    let branch_id = program.register_stat(branch);
    program.append_stat_list(&body, branch_id);
    let eq = fill(&mut program, cond, ExprKind::Eq);
    constant(&mut program, eq[1].clone(), 0.0);
    let modulo = fill(&mut program, eq[0].clone(), ExprKind::Mod);
    read(&mut program, modulo[0].clone(), "x");
    constant(&mut program, modulo[1].clone(), 50.0);
    increment(&mut program, &then, "y", 20.0);

    let pause = program.stat_from_type(StatKind::Sleep);
    let pause_value = pause.expr_ids()[0].clone();
    let pause_id = program.register_stat(pause);
    program.append_stat_list(&body, pause_id);
    constant(&mut program, pause_value, 50.0);

    program
}
