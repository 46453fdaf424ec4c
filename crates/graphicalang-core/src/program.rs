//! Program: the arena container for expressions, statements and statement
//! lists.
//!
//! [`Program`] is the single entry point for constructing and querying
//! programs. Nodes reference each other only through ids, and every lookup
//! returns an `Option`: a missing node is a hole, not an inconsistency.
//!
//! # Mutation protocol
//!
//! Allocation (reserving an id) is separate from binding (storing a node at
//! that id). Composite nodes built by [`Program::expr_from_type`] and
//! [`Program::stat_from_type`] reserve all of their child slots up front, so
//! an editor can address the empty placeholders before anything is dropped
//! into them.
//!
//! All mutations take `&mut self`. Callers who need a frozen copy (e.g. to
//! hand to a running interpreter while editing continues) clone the value.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::id::{ExprId, StatId, StatListId};
use crate::node::{Expr, ExprKind, Stat, StatKind};

/// Variable name given to freshly created `var` expressions and `assign`
/// statements.
pub const DEFAULT_VARIABLE: &str = "x";

/// The program arena.
///
/// Field names match the persisted blob: `stats`, `exprs`, `statLists`,
/// `statCount`, `exprCount`, `statListCount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    stats: IndexMap<StatId, Stat>,
    exprs: IndexMap<ExprId, Expr>,
    stat_lists: IndexMap<StatListId, Vec<StatId>>,
    stat_count: u64,
    expr_count: u64,
    stat_list_count: u64,
}

impl Program {
    /// Creates an empty program whose entry list exists and is empty.
    pub fn new() -> Self {
        let mut stat_lists = IndexMap::new();
        stat_lists.insert(StatListId::entry(), Vec::new());

        Program {
            stats: IndexMap::new(),
            exprs: IndexMap::new(),
            stat_lists,
            stat_count: 0,
            expr_count: 0,
            stat_list_count: 0,
        }
    }

    // -----------------------------------------------------------------------
    // Read-only accessors
    // -----------------------------------------------------------------------

    pub fn expr(&self, id: &ExprId) -> Option<&Expr> {
        self.exprs.get(id)
    }

    pub fn stat(&self, id: &StatId) -> Option<&Stat> {
        self.stats.get(id)
    }

    pub fn stat_list(&self, id: &StatListId) -> Option<&[StatId]> {
        self.stat_lists.get(id).map(Vec::as_slice)
    }

    /// The top-level statement sequence. Empty if the entry list is missing.
    pub fn entry(&self) -> &[StatId] {
        self.stat_list(&StatListId::entry()).unwrap_or(&[])
    }

    pub fn exprs(&self) -> &IndexMap<ExprId, Expr> {
        &self.exprs
    }

    pub fn stats(&self) -> &IndexMap<StatId, Stat> {
        &self.stats
    }

    pub fn stat_lists(&self) -> &IndexMap<StatListId, Vec<StatId>> {
        &self.stat_lists
    }

    pub fn expr_count(&self) -> u64 {
        self.expr_count
    }

    pub fn stat_count(&self) -> u64 {
        self.stat_count
    }

    pub fn stat_list_count(&self) -> u64 {
        self.stat_list_count
    }

    // -----------------------------------------------------------------------
    // Id allocation
    // -----------------------------------------------------------------------

    /// Reserves a fresh expression id. The slot stays a hole until
    /// [`set_expr`](Self::set_expr) fills it.
    pub fn allocate_expr_id(&mut self) -> ExprId {
        loop {
            let id = ExprId::from_counter(self.expr_count);
            self.expr_count += 1;
            if !self.exprs.contains_key(&id) {
                return id;
            }
        }
    }

    /// Reserves a fresh statement id.
    pub fn allocate_stat_id(&mut self) -> StatId {
        loop {
            let id = StatId::from_counter(self.stat_count);
            self.stat_count += 1;
            if !self.stats.contains_key(&id) {
                return id;
            }
        }
    }

    /// Reserves a fresh statement list id.
    pub fn allocate_stat_list_id(&mut self) -> StatListId {
        loop {
            let id = StatListId::from_counter(self.stat_list_count);
            self.stat_list_count += 1;
            if !self.stat_lists.contains_key(&id) {
                return id;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Node registration
    // -----------------------------------------------------------------------

    /// Stores `stat` under a fresh id and returns the id.
    pub fn register_stat(&mut self, stat: Stat) -> StatId {
        let id = self.allocate_stat_id();
        self.stats.insert(id.clone(), stat);
        id
    }

    /// Stores a statement list under a fresh id and returns the id.
    pub fn register_stat_list(&mut self, stat_ids: Vec<StatId>) -> StatListId {
        let id = self.allocate_stat_list_id();
        self.stat_lists.insert(id.clone(), stat_ids);
        id
    }

    /// Stores `expr` at `id`, or turns `id` into a hole when `expr` is `None`.
    pub fn set_expr(&mut self, id: ExprId, expr: Option<Expr>) {
        match expr {
            Some(expr) => {
                self.exprs.insert(id, expr);
            }
            None => {
                self.exprs.shift_remove(&id);
            }
        }
    }

    /// Stores `stat` at `id`, or turns `id` into a hole when `stat` is `None`.
    pub fn set_stat(&mut self, id: StatId, stat: Option<Stat>) {
        match stat {
            Some(stat) => {
                self.stats.insert(id, stat);
            }
            None => {
                self.stats.shift_remove(&id);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Default node construction
    // -----------------------------------------------------------------------

    /// Builds a default expression of the given kind.
    ///
    /// Operator kinds allocate their operand ids, which stay holes until the
    /// editor fills them. The returned node is not stored anywhere; pair it
    /// with [`set_expr`](Self::set_expr).
    pub fn expr_from_type(&mut self, kind: ExprKind) -> Expr {
        match kind {
            ExprKind::Const => Expr::Const { value: 0.0 },
            ExprKind::Var => Expr::Var {
                name: DEFAULT_VARIABLE.to_string(),
            },
            ExprKind::Not => Expr::Not {
                expr: self.allocate_expr_id(),
            },
            ExprKind::Add => self.binary_slots(|lhs, rhs| Expr::Add { lhs, rhs }),
            ExprKind::Sub => self.binary_slots(|lhs, rhs| Expr::Sub { lhs, rhs }),
            ExprKind::Mul => self.binary_slots(|lhs, rhs| Expr::Mul { lhs, rhs }),
            ExprKind::Div => self.binary_slots(|lhs, rhs| Expr::Div { lhs, rhs }),
            ExprKind::Mod => self.binary_slots(|lhs, rhs| Expr::Mod { lhs, rhs }),
            ExprKind::Eq => self.binary_slots(|lhs, rhs| Expr::Eq { lhs, rhs }),
            ExprKind::Neq => self.binary_slots(|lhs, rhs| Expr::Neq { lhs, rhs }),
            ExprKind::Lt => self.binary_slots(|lhs, rhs| Expr::Lt { lhs, rhs }),
            ExprKind::Lte => self.binary_slots(|lhs, rhs| Expr::Lte { lhs, rhs }),
            ExprKind::Gt => self.binary_slots(|lhs, rhs| Expr::Gt { lhs, rhs }),
            ExprKind::Gte => self.binary_slots(|lhs, rhs| Expr::Gte { lhs, rhs }),
            ExprKind::And => self.binary_slots(|lhs, rhs| Expr::And { lhs, rhs }),
            ExprKind::Or => self.binary_slots(|lhs, rhs| Expr::Or { lhs, rhs }),
        }
    }

    /// Allocates both operand holes, left first, and builds the node.
    fn binary_slots(&mut self, build: fn(ExprId, ExprId) -> Expr) -> Expr {
        let lhs = self.allocate_expr_id();
        let rhs = self.allocate_expr_id();
        build(lhs, rhs)
    }

    /// Builds a default statement of the given kind.
    ///
    /// Expression slots are allocated as holes; bodies are registered as new
    /// empty lists. The statement itself is not stored; pair it with
    /// [`register_stat`](Self::register_stat).
    pub fn stat_from_type(&mut self, kind: StatKind) -> Stat {
        match kind {
            StatKind::Assign => Stat::Assign {
                name: DEFAULT_VARIABLE.to_string(),
                value: self.allocate_expr_id(),
            },
            StatKind::If => {
                let cond = self.allocate_expr_id();
                let body1 = self.register_stat_list(Vec::new());
                let body2 = self.register_stat_list(Vec::new());
                Stat::If { cond, body1, body2 }
            }
            StatKind::While => {
                let cond = self.allocate_expr_id();
                let body = self.register_stat_list(Vec::new());
                Stat::While { cond, body }
            }
            StatKind::Sleep => Stat::Sleep {
                value: self.allocate_expr_id(),
            },
        }
    }

    // -----------------------------------------------------------------------
    // Statement list editing
    // -----------------------------------------------------------------------

    /// Appends `stat_id` to the end of the list.
    ///
    /// A missing list is left missing: the call succeeds without creating it.
    pub fn append_stat_list(&mut self, list_id: &StatListId, stat_id: StatId) {
        if let Some(list) = self.stat_lists.get_mut(list_id) {
            list.push(stat_id);
        }
    }

    /// Removes and returns the item at `index`. Out of range (or a missing
    /// list) is a no-op returning `None`.
    pub fn remove_stat_list_item(&mut self, list_id: &StatListId, index: usize) -> Option<StatId> {
        let list = self.stat_lists.get_mut(list_id)?;
        if index < list.len() {
            Some(list.remove(index))
        } else {
            None
        }
    }
}

impl Default for Program {
    fn default() -> Self {
        Program::new()
    }
}
