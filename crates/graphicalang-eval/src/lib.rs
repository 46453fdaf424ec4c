//! Stepwise interpreter for graphicalang programs.
//!
//! # Architecture
//!
//! - [`evaluate`] maps an expression id and a [`Bindings`] table to a number.
//!   It is pure and total.
//! - [`Runner`] walks the statement tree and yields one [`RunningState`] per
//!   statement boundary, plus one extra per `sleep`. It is an [`Iterator`]:
//!   nothing runs until the consumer pulls.
//! - [`Driver`] is the consumer side: it paces snapshots by their declared
//!   duration, forwards them to a [`Renderer`] and honors a [`CancelToken`].
//!
//! # Usage
//!
//! ```ignore
//! let driver = Driver::new(DriverConfig::default(), CancelToken::new());
//! let outcome = driver.drive(run(&program), &mut renderer, &mut SleepPacer::default());
//! ```

pub mod bindings;
pub mod driver;
pub mod eval;
pub mod snapshot;
pub mod state;

pub use bindings::{Bindings, SpecialVariables, SPECIAL_VARIABLES};
pub use driver::{
    pause_for, CancelToken, DriveOutcome, Driver, DriverConfig, NoPacing, Pacer, Renderer,
    SleepPacer,
};
pub use eval::{evaluate, is_truthy};
pub use snapshot::RunningState;
pub use state::{ExecutionState, Runner, RunnerConfig};

use graphicalang_core::Program;

/// Starts a run of `program` with the default configuration.
///
/// Every call gets a fresh variable table; a finished runner cannot be
/// restarted.
pub fn run(program: &Program) -> Runner<'_> {
    Runner::new(program, RunnerConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphicalang_core::{Expr, ExprId, ExprKind, Stat, StatId, StatKind, StatListId};

    /// Helper: store an expression under a fresh id.
    fn expr(program: &mut Program, expr: Expr) -> ExprId {
        let id = program.allocate_expr_id();
        program.set_expr(id.clone(), Some(expr));
        id
    }

    fn konst(program: &mut Program, value: f64) -> ExprId {
        expr(program, Expr::Const { value })
    }

    fn var(program: &mut Program, name: &str) -> ExprId {
        expr(program, Expr::Var { name: name.into() })
    }

    fn binary(program: &mut Program, kind: ExprKind, lhs: ExprId, rhs: ExprId) -> ExprId {
        let op = kind.binary_op().unwrap();
        expr(program, Expr::binary(op, lhs, rhs))
    }

    fn assign(program: &mut Program, name: &str, value: ExprId) -> StatId {
        program.register_stat(Stat::Assign {
            name: name.into(),
            value,
        })
    }

    fn list(program: &mut Program, stats: Vec<StatId>) -> StatListId {
        program.register_stat_list(stats)
    }

    fn push_entry(program: &mut Program, stat: StatId) {
        program.append_stat_list(&StatListId::entry(), stat);
    }

    fn ids(states: &[RunningState]) -> Vec<&str> {
        states.iter().map(|s| s.current_stat.as_str()).collect()
    }

    #[test]
    fn while_false_emits_one_snapshot() {
        let mut program = Program::new();
        let cond = konst(&mut program, 0.0);
        let body = list(&mut program, vec![]);
        let w = program.register_stat(Stat::While { cond, body });
        push_entry(&mut program, w.clone());

        let states: Vec<RunningState> = run(&program).collect();
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].current_stat, w);
        assert_eq!(states[0].duration, None);
    }

    #[test]
    fn if_true_runs_first_body() {
        let mut program = Program::new();
        let five = konst(&mut program, 5.0);
        let a = assign(&mut program, "x", five);
        let body1 = list(&mut program, vec![a.clone()]);
        let body2 = list(&mut program, vec![]);
        let cond = konst(&mut program, 1.0);
        let i = program.register_stat(Stat::If { cond, body1, body2 });
        push_entry(&mut program, i.clone());

        let mut runner = run(&program);
        let states: Vec<RunningState> = runner.by_ref().collect();
        assert_eq!(ids(&states), vec![i.as_str(), a.as_str()]);
        // Both snapshots are pre-effect.
        assert!(states.iter().all(|s| s.special_variables.x == 0.0));
        assert_eq!(runner.bindings().get("x"), Some(5.0));
    }

    #[test]
    fn if_false_with_empty_else_shows_if_twice() {
        let mut program = Program::new();
        let stat = program.stat_from_type(StatKind::If);
        // Condition left as a hole: evaluates to 0, so body2 (empty) runs.
        let i = program.register_stat(stat);
        push_entry(&mut program, i.clone());

        let states: Vec<RunningState> = run(&program).collect();
        assert_eq!(ids(&states), vec![i.as_str(), i.as_str()]);
    }

    #[test]
    fn sleep_emits_duration_snapshot() {
        let mut program = Program::new();
        let ten = konst(&mut program, 10.0);
        let s = program.register_stat(Stat::Sleep { value: ten });
        push_entry(&mut program, s.clone());

        let states: Vec<RunningState> = run(&program).collect();
        assert_eq!(states.len(), 2);
        assert_eq!(states[0].current_stat, s);
        assert_eq!(states[0].duration, None);
        assert_eq!(states[1].current_stat, s);
        assert_eq!(states[1].duration, Some(10.0));
        assert_eq!(states[0].variables, states[1].variables);
    }

    #[test]
    fn hole_statement_emits_position_only() {
        let mut program = Program::new();
        let missing = program.allocate_stat_id();
        let one = konst(&mut program, 1.0);
        let after = assign(&mut program, "y", one);
        push_entry(&mut program, missing.clone());
        push_entry(&mut program, after.clone());

        let mut runner = run(&program);
        let states: Vec<RunningState> = runner.by_ref().collect();
        assert_eq!(ids(&states), vec![missing.as_str(), after.as_str()]);
        assert_eq!(runner.bindings().get("y"), Some(1.0));
    }

    #[test]
    fn counting_loop() {
        // i := 0; while i < 3 { i := i + 1 }
        let mut program = Program::new();
        let zero = konst(&mut program, 0.0);
        let init = assign(&mut program, "i", zero);

        let i_read = var(&mut program, "i");
        let one = konst(&mut program, 1.0);
        let inc_value = binary(&mut program, ExprKind::Add, i_read, one);
        let inc = assign(&mut program, "i", inc_value);
        let body = list(&mut program, vec![inc.clone()]);

        let i_cond = var(&mut program, "i");
        let three = konst(&mut program, 3.0);
        let cond = binary(&mut program, ExprKind::Lt, i_cond, three);
        let w = program.register_stat(Stat::While { cond, body });

        push_entry(&mut program, init.clone());
        push_entry(&mut program, w.clone());

        let states: Vec<RunningState> = run(&program).collect();
        assert_eq!(
            ids(&states),
            vec![init.as_str(), w.as_str(), inc.as_str(), inc.as_str(), inc.as_str()]
        );
        let seen: Vec<f64> = states[2..].iter().map(|s| s.variable("i").unwrap()).collect();
        assert_eq!(seen, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn while_with_empty_body_repeats_its_own_id() {
        // Never terminates; pull a bounded prefix.
        let mut program = Program::new();
        let cond = konst(&mut program, 1.0);
        let body = list(&mut program, vec![]);
        let w = program.register_stat(Stat::While { cond, body });
        push_entry(&mut program, w.clone());

        let states: Vec<RunningState> = run(&program).take(50).collect();
        assert_eq!(states.len(), 50);
        assert!(states.iter().all(|s| s.current_stat == w));
    }

    #[test]
    fn while_with_missing_body_list_still_yields() {
        let mut program = Program::new();
        let cond = konst(&mut program, 1.0);
        let w = program.register_stat(Stat::While {
            cond,
            body: StatListId::from("gone"),
        });
        push_entry(&mut program, w);

        assert_eq!(run(&program).take(10).count(), 10);
    }

    #[test]
    fn while_body_containing_itself() {
        // The model accepts it; walking it nests forever, one snapshot per level.
        let mut program = Program::new();
        let stat = program.stat_from_type(StatKind::While);
        let (cond, body) = match &stat {
            Stat::While { cond, body } => (cond.clone(), body.clone()),
            _ => unreachable!(),
        };
        program.set_expr(cond, Some(Expr::Const { value: 1.0 }));
        let w = program.register_stat(stat);
        program.append_stat_list(&body, w.clone());
        push_entry(&mut program, w.clone());

        let mut runner = run(&program);
        let states: Vec<RunningState> = runner.by_ref().take(20).collect();
        assert!(states.iter().all(|s| s.current_stat == w));
        assert!(runner.depth() > 5);
    }

    #[test]
    fn unset_variable_condition_is_true() {
        // if ghost { a := 1 } else { a := 2 }
        let mut program = Program::new();
        let one = konst(&mut program, 1.0);
        let two = konst(&mut program, 2.0);
        let then_stat = assign(&mut program, "a", one);
        let else_stat = assign(&mut program, "a", two);
        let body1 = list(&mut program, vec![then_stat]);
        let body2 = list(&mut program, vec![else_stat]);
        let cond = var(&mut program, "ghost");
        let i = program.register_stat(Stat::If { cond, body1, body2 });
        push_entry(&mut program, i);

        let mut runner = run(&program);
        runner.by_ref().for_each(drop);
        assert_eq!(runner.bindings().get("a"), Some(1.0));
    }

    #[test]
    fn while_with_self_referencing_condition_runs() {
        // cond = not(cond): the re-entry reads 0, so cond is 1 and stays 1.
        let mut program = Program::new();
        let cond = program.allocate_expr_id();
        program.set_expr(cond.clone(), Some(Expr::Not { expr: cond.clone() }));
        let body = list(&mut program, vec![]);
        let w = program.register_stat(Stat::While { cond, body });
        push_entry(&mut program, w.clone());

        let states: Vec<RunningState> = run(&program).take(5).collect();
        assert_eq!(states.len(), 5);
        assert!(states.iter().all(|s| s.current_stat == w));
    }

    #[test]
    fn special_variables_follow_assignments() {
        let mut program = Program::new();
        let ten = konst(&mut program, 10.0);
        let ninety = konst(&mut program, 90.0);
        let mx = assign(&mut program, "x", ten);
        let ma = assign(&mut program, "angle", ninety);
        let pause = konst(&mut program, 0.0);
        let s = program.register_stat(Stat::Sleep { value: pause });
        for stat in [mx, ma, s] {
            push_entry(&mut program, stat);
        }

        let states: Vec<RunningState> = run(&program).collect();
        let last = states.last().unwrap();
        assert_eq!(last.special_variables.x, 10.0);
        assert_eq!(last.special_variables.y, 0.0);
        assert_eq!(last.special_variables.angle, 90.0);
        assert_eq!(last.duration, Some(0.0));
    }

    #[test]
    fn variables_are_sorted_in_snapshots() {
        let mut program = Program::new();
        let one = konst(&mut program, 1.0);
        let two = konst(&mut program, 2.0);
        let b = assign(&mut program, "b", one);
        let a = assign(&mut program, "a", two);
        let s = program.register_stat(Stat::Sleep {
            value: ExprId::from("hole"),
        });
        for stat in [b, a, s] {
            push_entry(&mut program, stat);
        }

        let states: Vec<RunningState> = run(&program).collect();
        let names: Vec<&str> = states
            .last()
            .unwrap()
            .variables
            .iter()
            .map(|(n, _)| n.as_str())
            .collect();
        assert_eq!(names, vec!["a", "angle", "b", "x", "y"]);
    }

    #[test]
    fn each_run_starts_fresh() {
        let mut program = Program::new();
        let one = konst(&mut program, 1.0);
        let x_read = var(&mut program, "x");
        let value = binary(&mut program, ExprKind::Add, x_read, one);
        let inc = assign(&mut program, "x", value);
        push_entry(&mut program, inc);

        for _ in 0..3 {
            let mut runner = run(&program);
            runner.by_ref().for_each(drop);
            assert_eq!(runner.bindings().get("x"), Some(1.0));
        }
    }

    #[test]
    fn runner_sees_frozen_copy_while_host_edits() {
        let mut document = Program::new();
        let one = konst(&mut document, 1.0);
        let a = assign(&mut document, "a", one);
        push_entry(&mut document, a);

        let frozen = document.clone();
        let mut runner = run(&frozen);
        assert!(runner.next().is_some());

        // Editing the document does not reach the in-flight run.
        let two = konst(&mut document, 2.0);
        let b = assign(&mut document, "b", two);
        push_entry(&mut document, b);

        assert_eq!(runner.next(), None);
        assert_eq!(runner.bindings().get("b"), None);
        assert_eq!(run(&document).count(), 2);
    }
}
