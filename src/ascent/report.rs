//! Solve outcome.

use crate::model::Bindings;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Why the ascent loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AscentStatus {
    /// An iteration past `min_iterations` made no move.
    Converged,
    /// The iteration budget ran out first.
    MaxIterationsReached,
}

/// Result of a solve.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Report {
    /// Name of the solved model.
    pub model: String,

    pub status: AscentStatus,

    /// Iterations executed.
    pub iterations: usize,

    /// Final variable values, in registration order.
    pub bindings: Bindings,

    /// Objective at the final binding.
    pub objective_value: f64,

    /// Moves committed. For the combinatorial strategy, one per
    /// iteration that changed the binding.
    pub accepted_moves: usize,

    /// Objective at the start, then after each iteration.
    pub objective_history: Vec<f64>,
}

impl Report {
    pub fn value(&self, name: &str) -> Option<i64> {
        self.bindings.get(name)
    }

    pub fn converged(&self) -> bool {
        self.status == AscentStatus::Converged
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solution for: {}", self.model)?;
        writeln!(f, "Iterations: {}", self.iterations)?;
        for (name, value) in self.bindings.iter() {
            writeln!(f, "{name} = {value}")?;
        }
        write!(f, "Objective value: {}", self.objective_value)
    }
}
