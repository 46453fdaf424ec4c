//! Editor operations behind the mutating subcommands.
//!
//! Each function applies one edit to an in-memory [`Program`]; the caller
//! loads and saves around it. Ids are taken as the user typed them, and an
//! edit against a list or statement that does not exist is reported instead
//! of silently ignored.

use graphicalang_core::{Expr, ExprId, ExprKind, Program, Stat, StatId, StatKind, StatListId};

use crate::error::CliError;

/// Slots created by an edit, for the user to fill next.
#[derive(Debug, Default, PartialEq)]
pub struct NewSlots {
    pub exprs: Vec<ExprId>,
    pub lists: Vec<StatListId>,
}

/// Builds a default statement of `kind` and appends it to `list`.
pub fn add_stat(
    program: &mut Program,
    list: &StatListId,
    kind: &str,
) -> Result<(StatId, NewSlots), CliError> {
    let kind: StatKind = kind.parse()?;
    if program.stat_list(list).is_none() {
        return Err(CliError::UnknownList(list.to_string()));
    }

    let stat = program.stat_from_type(kind);
    let slots = NewSlots {
        exprs: stat.expr_ids().into_iter().cloned().collect(),
        lists: stat.stat_list_ids().into_iter().cloned().collect(),
    };
    let id = program.register_stat(stat);
    program.append_stat_list(list, id.clone());
    tracing::debug!(stat = %id, %kind, %list, "statement added");
    Ok((id, slots))
}

/// Stores a default expression of `kind` at `id`, replacing whatever was
/// there. `value` applies to constants and `name` to variable reads.
pub fn set_expr(
    program: &mut Program,
    id: ExprId,
    kind: &str,
    value: Option<f64>,
    name: Option<String>,
) -> Result<NewSlots, CliError> {
    let kind: ExprKind = kind.parse()?;
    if let Some(value) = value {
        if !value.is_finite() {
            return Err(CliError::NonFiniteValue(value));
        }
    }

    let mut expr = program.expr_from_type(kind);
    match &mut expr {
        Expr::Const { value: slot } => {
            if let Some(value) = value {
                *slot = value;
            }
        }
        Expr::Var { name: slot } => {
            if let Some(name) = name {
                *slot = name;
            }
        }
        _ => {
            if value.is_some() || name.is_some() {
                tracing::warn!(%kind, "--value and --name only apply to const and var");
            }
        }
    }

    let slots = NewSlots {
        exprs: expr.children().into_iter().cloned().collect(),
        lists: Vec::new(),
    };
    program.set_expr(id, Some(expr));
    Ok(slots)
}

/// Turns `id` back into a hole.
pub fn unset_expr(program: &mut Program, id: ExprId) {
    program.set_expr(id, None);
}

/// Changes the target variable of an assignment.
pub fn rename(program: &mut Program, stat: &StatId, name: String) -> Result<(), CliError> {
    let value = match program.stat(stat) {
        Some(Stat::Assign { value, .. }) => value.clone(),
        Some(_) => return Err(CliError::NotAnAssignment(stat.to_string())),
        None => return Err(CliError::UnknownStat(stat.to_string())),
    };
    program.set_stat(stat.clone(), Some(Stat::Assign { name, value }));
    Ok(())
}

/// Detaches the item at `index` from `list`. The statement stays in the
/// arena.
pub fn remove(program: &mut Program, list: &StatListId, index: usize) -> Result<StatId, CliError> {
    if program.stat_list(list).is_none() {
        return Err(CliError::UnknownList(list.to_string()));
    }
    program
        .remove_stat_list_item(list, index)
        .ok_or_else(|| CliError::IndexOutOfRange {
            list: list.to_string(),
            index,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_stat_reports_slots() {
        let mut program = Program::new();
        let (id, slots) = add_stat(&mut program, &StatListId::entry(), "if").unwrap();
        assert_eq!(program.entry(), &[id]);
        assert_eq!(slots.exprs.len(), 1);
        assert_eq!(slots.lists.len(), 2);
        for list in &slots.lists {
            assert_eq!(program.stat_list(list), Some(&[][..]));
        }
    }

    #[test]
    fn add_stat_rejects_unknown_kind_and_list() {
        let mut program = Program::new();
        assert!(matches!(
            add_stat(&mut program, &StatListId::entry(), "loop"),
            Err(CliError::Core(_))
        ));
        assert!(matches!(
            add_stat(&mut program, &StatListId::from("nowhere"), "sleep"),
            Err(CliError::UnknownList(_))
        ));
        assert!(program.stats().is_empty());
    }

    #[test]
    fn set_expr_applies_value_and_name() {
        let mut program = Program::new();
        let slot = program.allocate_expr_id();
        set_expr(&mut program, slot.clone(), "const", Some(4.5), None).unwrap();
        assert_eq!(program.expr(&slot), Some(&Expr::Const { value: 4.5 }));

        set_expr(&mut program, slot.clone(), "var", None, Some("angle".into())).unwrap();
        assert_eq!(
            program.expr(&slot),
            Some(&Expr::Var {
                name: "angle".into()
            })
        );
    }

    #[test]
    fn set_expr_binary_returns_operand_holes() {
        let mut program = Program::new();
        let slot = program.allocate_expr_id();
        let slots = set_expr(&mut program, slot, "lt", None, None).unwrap();
        assert_eq!(slots.exprs.len(), 2);
        assert!(slots.exprs.iter().all(|id| program.expr(id).is_none()));
    }

    #[test]
    fn set_expr_rejects_non_finite_value() {
        let mut program = Program::new();
        let slot = program.allocate_expr_id();
        assert!(matches!(
            set_expr(&mut program, slot.clone(), "const", Some(f64::NAN), None),
            Err(CliError::NonFiniteValue(_))
        ));
        assert!(program.expr(&slot).is_none());
    }

    #[test]
    fn unset_expr_makes_a_hole() {
        let mut program = Program::new();
        let slot = program.allocate_expr_id();
        set_expr(&mut program, slot.clone(), "const", Some(1.0), None).unwrap();
        unset_expr(&mut program, slot.clone());
        assert!(program.expr(&slot).is_none());
    }

    #[test]
    fn rename_only_applies_to_assignments() {
        let mut program = Program::new();
        let entry = StatListId::entry();
        let (assign, _) = add_stat(&mut program, &entry, "assign").unwrap();
        let (sleep, _) = add_stat(&mut program, &entry, "sleep").unwrap();

        rename(&mut program, &assign, "y".into()).unwrap();
        assert!(matches!(program.stat(&assign), Some(Stat::Assign { name, .. }) if name == "y"));

        assert!(matches!(
            rename(&mut program, &sleep, "y".into()),
            Err(CliError::NotAnAssignment(_))
        ));
        assert!(matches!(
            rename(&mut program, &StatId::from("99"), "y".into()),
            Err(CliError::UnknownStat(_))
        ));
    }

    #[test]
    fn remove_detaches_but_keeps_statement() {
        let mut program = Program::new();
        let entry = StatListId::entry();
        let (id, _) = add_stat(&mut program, &entry, "sleep").unwrap();

        assert!(matches!(
            remove(&mut program, &entry, 1),
            Err(CliError::IndexOutOfRange { index: 1, .. })
        ));
        assert_eq!(remove(&mut program, &entry, 0).unwrap(), id);
        assert!(program.entry().is_empty());
        assert!(program.stat(&id).is_some());
    }
}
