//! Resumable statement scheduler.
//!
//! The [`Runner`] walks a program's statement tree as an explicit state
//! machine: a stack of frames stands in for the call stack of a recursive
//! walk, so execution can stop after any snapshot and pick up again when the
//! consumer asks for the next one. State transitions are
//! `Ready -> Running -> Completed`.
//!
//! Each statement produces a snapshot *before* its effect runs. The effect
//! itself is applied on the following [`Runner::step`], so nothing is
//! computed ahead of what the consumer has pulled.

use graphicalang_core::{ExprId, Program, Stat, StatId, StatListId};

use crate::bindings::Bindings;
use crate::eval::{evaluate, is_truthy};
use crate::snapshot::RunningState;

/// Execution state of the runner state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    /// Created, nothing pulled yet.
    Ready,
    /// At least one snapshot emitted, more may follow.
    Running,
    /// The entry list has been walked to the end.
    Completed,
}

/// Configuration for the runner.
#[derive(Debug, Clone, Default)]
pub struct RunnerConfig {
    /// Whether to keep a copy of every emitted snapshot.
    pub trace_enabled: bool,
}

/// A suspended position in the statement walk.
#[derive(Debug)]
enum Frame<'p> {
    /// Walking a statement list. `owner` is the `if`/`while` whose body this
    /// is, `None` for the entry list.
    Seq {
        stats: &'p [StatId],
        next: usize,
        owner: Option<&'p StatId>,
    },
    /// A `while` between iterations; the condition is checked on resume.
    Loop {
        stat: &'p StatId,
        cond: &'p ExprId,
        body: &'p StatListId,
    },
}

/// Lazy snapshot producer for one run of a program.
///
/// Borrows the program for the whole run; a host that keeps editing should
/// hand the runner a clone. Each runner owns its own [`Bindings`], seeded
/// with the special variables at 0.
pub struct Runner<'p> {
    program: &'p Program,
    config: RunnerConfig,
    state: ExecutionState,
    bindings: Bindings,
    stack: Vec<Frame<'p>>,
    /// Statement whose pre-effect snapshot was emitted but whose effect has
    /// not run yet.
    pending: Option<&'p StatId>,
    emitted: u64,
    trace: Option<Vec<RunningState>>,
}

impl<'p> Runner<'p> {
    /// Creates a runner in the Ready state.
    pub fn new(program: &'p Program, config: RunnerConfig) -> Self {
        let trace = if config.trace_enabled {
            Some(Vec::new())
        } else {
            None
        };

        Runner {
            program,
            config,
            state: ExecutionState::Ready,
            bindings: Bindings::seeded(),
            stack: Vec::new(),
            pending: None,
            emitted: 0,
            trace,
        }
    }

    fn start(&mut self) {
        tracing::debug!(
            statements = self.program.entry().len(),
            trace = self.config.trace_enabled,
            "run started"
        );
        self.state = ExecutionState::Running;
        self.stack.push(Frame::Seq {
            stats: self.program.entry(),
            next: 0,
            owner: None,
        });
    }

    /// Advances to the next snapshot.
    ///
    /// Returns `None` once the program has finished; a completed runner stays
    /// completed. A `while` whose condition never becomes 0 never finishes,
    /// but every call still returns after at most one statement boundary.
    pub fn step(&mut self) -> Option<RunningState> {
        match self.state {
            ExecutionState::Ready => self.start(),
            ExecutionState::Running => {}
            ExecutionState::Completed => return None,
        }

        let program = self.program;
        loop {
            if let Some(stat_id) = self.pending.take() {
                if let Some(snapshot) = self.apply(stat_id) {
                    return Some(self.emit(snapshot));
                }
                continue;
            }

            let frame = match self.stack.last_mut() {
                Some(frame) => frame,
                None => {
                    self.state = ExecutionState::Completed;
                    tracing::debug!(snapshots = self.emitted, "run completed");
                    return None;
                }
            };

            match frame {
                Frame::Seq { stats, next, owner } => {
                    let (stats, owner): (&'p [StatId], Option<&'p StatId>) = (*stats, *owner);
                    if let Some(stat_id) = stats.get(*next) {
                        *next += 1;
                        self.pending = Some(stat_id);
                        let snapshot = self.capture(stat_id, None);
                        return Some(self.emit(snapshot));
                    }

                    self.stack.pop();
                    // An empty body still shows its owner once.
                    if stats.is_empty() {
                        if let Some(owner) = owner {
                            let snapshot = self.capture(owner, None);
                            return Some(self.emit(snapshot));
                        }
                    }
                }
                Frame::Loop { stat, cond, body } => {
                    let (stat, cond, body) = (*stat, *cond, *body);
                    if is_truthy(evaluate(program, cond, &self.bindings)) {
                        self.enter(body, stat);
                    } else {
                        self.stack.pop();
                    }
                }
            }
        }
    }

    /// Runs the effect of a statement whose snapshot was already emitted.
    ///
    /// Returns the extra snapshot a `sleep` produces. A hole has no effect.
    fn apply(&mut self, stat_id: &'p StatId) -> Option<RunningState> {
        let program = self.program;
        let stat = program.stat(stat_id)?;

        match stat {
            Stat::Assign { name, value } => {
                let value = evaluate(program, value, &self.bindings);
                self.bindings.set(name.clone(), value);
                None
            }
            Stat::If { cond, body1, body2 } => {
                let body = if is_truthy(evaluate(program, cond, &self.bindings)) {
                    body1
                } else {
                    body2
                };
                self.enter(body, stat_id);
                None
            }
            Stat::While { cond, body } => {
                self.stack.push(Frame::Loop {
                    stat: stat_id,
                    cond,
                    body,
                });
                None
            }
            Stat::Sleep { value } => {
                let duration = evaluate(program, value, &self.bindings);
                Some(self.capture(stat_id, Some(duration)))
            }
        }
    }

    /// Pushes a body list. A missing list walks as an empty one.
    fn enter(&mut self, list_id: &'p StatListId, owner: &'p StatId) {
        let program = self.program;
        let stats = program.stat_list(list_id).unwrap_or(&[]);
        self.stack.push(Frame::Seq {
            stats,
            next: 0,
            owner: Some(owner),
        });
    }

    fn capture(&self, stat_id: &StatId, duration: Option<f64>) -> RunningState {
        RunningState::capture(stat_id.clone(), &self.bindings, duration)
    }

    fn emit(&mut self, snapshot: RunningState) -> RunningState {
        self.emitted += 1;
        if let Some(trace) = &mut self.trace {
            trace.push(snapshot.clone());
        }
        snapshot
    }

    /// Returns the current execution state.
    pub fn state(&self) -> ExecutionState {
        self.state
    }

    /// Current variable table.
    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Number of snapshots emitted so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Nesting depth of the walk (entry list, bodies and loops).
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Returns the snapshot trace (if tracing was enabled).
    pub fn trace(&self) -> Option<&[RunningState]> {
        self.trace.as_deref()
    }
}

impl Iterator for Runner<'_> {
    type Item = RunningState;

    fn next(&mut self) -> Option<RunningState> {
        self.step()
    }
}

impl std::iter::FusedIterator for Runner<'_> {}
