//! Execution snapshots emitted by the [`Runner`](crate::Runner).
//!
//! A [`RunningState`] is a point-in-time copy: it owns its variable table, so
//! a consumer can hold on to it while the run continues.

use graphicalang_core::StatId;
use serde::{Deserialize, Serialize};

use crate::bindings::{Bindings, SpecialVariables};

/// One emitted point of execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunningState {
    /// The statement about to run (or, for a sleep, the one pausing).
    pub current_stat: StatId,
    /// Every bound variable, name ascending.
    pub variables: Vec<(String, f64)>,
    /// The renderer's view: `x`, `y`, `angle`, 0 when unset.
    pub special_variables: SpecialVariables,
    /// Present only on the second snapshot of a `sleep` statement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl RunningState {
    pub fn capture(current_stat: StatId, bindings: &Bindings, duration: Option<f64>) -> Self {
        RunningState {
            current_stat,
            variables: bindings.to_sorted_pairs(),
            special_variables: bindings.special(),
            duration,
        }
    }

    /// Looks up a variable in the captured table.
    pub fn variable(&self, name: &str) -> Option<f64> {
        self.variables
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| *value)
    }
}
