//! Property tests for the program mutation protocol.

use std::collections::HashSet;

use graphicalang_core::{Expr, ExprId, ExprKind, Program, StatId, StatKind, StatListId};
use proptest::prelude::*;

/// One editor action against a program.
#[derive(Debug, Clone)]
enum Edit {
    AddStat { kind: usize, list: usize },
    FillExpr { kind: usize, slot: usize },
    ClearExpr { slot: usize },
    ClearStat { slot: usize },
    Remove { list: usize, index: usize },
    AllocateStatList,
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        (0..StatKind::ALL.len(), any::<usize>()).prop_map(|(kind, list)| Edit::AddStat { kind, list }),
        (0..ExprKind::ALL.len(), any::<usize>()).prop_map(|(kind, slot)| Edit::FillExpr { kind, slot }),
        any::<usize>().prop_map(|slot| Edit::ClearExpr { slot }),
        any::<usize>().prop_map(|slot| Edit::ClearStat { slot }),
        (any::<usize>(), 0usize..6).prop_map(|(list, index)| Edit::Remove { list, index }),
        Just(Edit::AllocateStatList),
    ]
}

fn pick<T: Clone>(items: &[T], n: usize) -> Option<T> {
    if items.is_empty() {
        None
    } else {
        Some(items[n % items.len()].clone())
    }
}

/// Applies an edit, checking every id handed out along the way is fresh.
fn apply(
    program: &mut Program,
    edit: &Edit,
    seen_exprs: &mut HashSet<ExprId>,
    seen_stats: &mut HashSet<StatId>,
    seen_lists: &mut HashSet<StatListId>,
) {
    let lists: Vec<StatListId> = program.stat_lists().keys().cloned().collect();
    match edit {
        Edit::AddStat { kind, list } => {
            let stat = program.stat_from_type(StatKind::ALL[*kind]);
            for id in stat.expr_ids() {
                assert!(seen_exprs.insert(id.clone()), "expr id {id} reused");
            }
            for id in stat.stat_list_ids() {
                assert!(seen_lists.insert(id.clone()), "list id {id} reused");
            }
            let id = program.register_stat(stat);
            assert!(seen_stats.insert(id.clone()), "stat id {id} reused");
            if let Some(list) = pick(&lists, *list) {
                program.append_stat_list(&list, id);
            }
        }
        Edit::FillExpr { kind, slot } => {
            let slots: Vec<ExprId> = seen_exprs.iter().cloned().collect();
            if let Some(slot) = pick(&slots, *slot) {
                let expr = program.expr_from_type(ExprKind::ALL[*kind]);
                for id in expr.children() {
                    assert!(seen_exprs.insert(id.clone()), "expr id {id} reused");
                }
                program.set_expr(slot, Some(expr));
            }
        }
        Edit::ClearExpr { slot } => {
            let slots: Vec<ExprId> = program.exprs().keys().cloned().collect();
            if let Some(slot) = pick(&slots, *slot) {
                program.set_expr(slot, None);
            }
        }
        Edit::ClearStat { slot } => {
            let slots: Vec<StatId> = program.stats().keys().cloned().collect();
            if let Some(slot) = pick(&slots, *slot) {
                program.set_stat(slot, None);
            }
        }
        Edit::Remove { list, index } => {
            if let Some(list) = pick(&lists, *list) {
                program.remove_stat_list_item(&list, *index);
            }
        }
        Edit::AllocateStatList => {
            let id = program.register_stat_list(Vec::new());
            assert!(seen_lists.insert(id.clone()), "list id {id} reused");
        }
    }
}

proptest! {
    #[test]
    fn allocated_ids_are_never_reused(edits in prop::collection::vec(edit_strategy(), 0..60)) {
        let mut program = Program::new();
        let mut seen_exprs = HashSet::new();
        let mut seen_stats = HashSet::new();
        let mut seen_lists = HashSet::new();
        seen_lists.insert(StatListId::entry());

        for edit in &edits {
            apply(&mut program, edit, &mut seen_exprs, &mut seen_stats, &mut seen_lists);
        }

        // Whatever was bound or cleared, the next ids are still fresh.
        let next_expr = program.allocate_expr_id();
        prop_assert!(!seen_exprs.contains(&next_expr));
        let next_stat = program.allocate_stat_id();
        prop_assert!(!seen_stats.contains(&next_stat));
        let next_list = program.allocate_stat_list_id();
        prop_assert!(!seen_lists.contains(&next_list));
    }

    #[test]
    fn append_then_remove_restores_list(
        kinds in prop::collection::vec(0..StatKind::ALL.len(), 0..8),
        extra in 0..StatKind::ALL.len(),
    ) {
        let mut program = Program::new();
        let entry = StatListId::entry();
        for kind in kinds {
            let stat = program.stat_from_type(StatKind::ALL[kind]);
            let id = program.register_stat(stat);
            program.append_stat_list(&entry, id);
        }
        let before: Vec<StatId> = program.entry().to_vec();

        let stat = program.stat_from_type(StatKind::ALL[extra]);
        let id = program.register_stat(stat);
        program.append_stat_list(&entry, id.clone());
        let removed = program.remove_stat_list_item(&entry, before.len());

        prop_assert_eq!(removed, Some(id));
        prop_assert_eq!(program.entry(), before.as_slice());
    }

    #[test]
    fn blob_round_trip(
        edits in prop::collection::vec(edit_strategy(), 0..40),
        values in prop::collection::vec(any::<f64>().prop_filter("finite", |v| v.is_finite()), 0..10),
    ) {
        let mut program = Program::new();
        let mut seen_exprs = HashSet::new();
        let mut seen_stats = HashSet::new();
        let mut seen_lists = HashSet::new();
        seen_lists.insert(StatListId::entry());
        for edit in &edits {
            apply(&mut program, edit, &mut seen_exprs, &mut seen_stats, &mut seen_lists);
        }
        for value in values {
            let id = program.allocate_expr_id();
            program.set_expr(id, Some(Expr::Const { value }));
        }

        let json = serde_json::to_string(&program).unwrap();
        let back: Program = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, program);
    }
}
