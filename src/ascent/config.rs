//! Ascent configuration and gradient strategies.

use crate::error::ConfigurationError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How each iteration picks its moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GradientStrategy {
    /// Finite difference per variable, then one signed step per variable
    /// in registration order, each committed immediately if feasible.
    ///
    /// `2n` objective evaluations for the gradient plus up to `n`
    /// feasibility checks per iteration.
    #[default]
    CoordinateWise,

    /// Enumerates every sign vector in `{-1, 0, +1}^n` and adopts each
    /// feasible candidate that strictly beats the current reference.
    ///
    /// `3^n` candidates per iteration. Only practical for a handful of
    /// variables.
    CombinatorialNeighbor,
}

/// Configuration for the ascent solver.
///
/// # Examples
///
/// ```
/// use u_discrete_ascent::ascent::{AscentConfig, GradientStrategy};
///
/// let config = AscentConfig::default()
///     .with_step_size(2)
///     .with_max_iterations(500)
///     .with_min_iterations(5)
///     .with_strategy(GradientStrategy::CombinatorialNeighbor);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AscentConfig {
    /// Change applied to a variable by one move. Must be positive.
    pub step_size: i64,

    /// Hard iteration budget.
    pub max_iterations: usize,

    /// Iterations to run before an iteration without moves may stop the search.
    pub min_iterations: usize,

    pub strategy: GradientStrategy,
}

impl Default for AscentConfig {
    fn default() -> Self {
        Self {
            step_size: 1,
            max_iterations: 1000,
            min_iterations: 3,
            strategy: GradientStrategy::default(),
        }
    }
}

impl AscentConfig {
    pub fn with_step_size(mut self, step: i64) -> Self {
        self.step_size = step;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_min_iterations(mut self, n: usize) -> Self {
        self.min_iterations = n;
        self
    }

    pub fn with_strategy(mut self, strategy: GradientStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.step_size <= 0 {
            return Err(ConfigurationError::InvalidParameter(format!(
                "step_size must be positive, got {}",
                self.step_size
            )));
        }
        Ok(())
    }
}
