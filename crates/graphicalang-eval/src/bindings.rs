//! The per-run variable table.
//!
//! [`Bindings`] is created fresh for every run, seeded with the special
//! variables at 0, written only by the [`Runner`](crate::Runner) and dropped
//! when the run ends.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Names of the variables a renderer animates from.
pub const SPECIAL_VARIABLES: [&str; 3] = ["x", "y", "angle"];

/// Sprite position and heading, each 0 when the variable is unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecialVariables {
    pub x: f64,
    pub y: f64,
    pub angle: f64,
}

/// Variable name to value, ordered by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    values: BTreeMap<String, f64>,
}

impl Bindings {
    /// An empty table with no special variables.
    pub fn new() -> Self {
        Bindings::default()
    }

    /// The table a run starts from: `angle`, `x` and `y` bound to 0.
    pub fn seeded() -> Self {
        let mut bindings = Bindings::new();
        for name in SPECIAL_VARIABLES {
            bindings.set(name, 0.0);
        }
        bindings
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All bindings as `(name, value)` pairs, name ascending.
    pub fn to_sorted_pairs(&self) -> Vec<(String, f64)> {
        self.values
            .iter()
            .map(|(name, value)| (name.clone(), *value))
            .collect()
    }

    pub fn special(&self) -> SpecialVariables {
        SpecialVariables {
            x: self.get("x").unwrap_or(0.0),
            y: self.get("y").unwrap_or(0.0),
            angle: self.get("angle").unwrap_or(0.0),
        }
    }
}
