//! Ascent execution loop.
//!
//! # Algorithm (coordinate-wise)
//!
//! 1. Compute the discrete gradient at the current binding
//! 2. For each variable in registration order with a non-zero score:
//!    a. Propose `x + step` (positive score) or `max(0, x - step)` (negative)
//!    b. Check every constraint against the current binding with only
//!       that variable replaced
//!    c. Commit the move immediately if feasible
//! 3. Stop once an iteration commits nothing and at least
//!    `min_iterations` have run, or after `max_iterations`
//!
//! Moves committed earlier in an iteration are visible to the
//! feasibility checks of later variables in the same iteration, so the
//! registration order shapes the trajectory and, for coupled
//! constraints, the final binding.
//!
//! # Algorithm (combinatorial neighbour)
//!
//! Each iteration replaces the binding with the result of
//! [`best_neighbor`]; the stopping rule is the same.

use super::config::{AscentConfig, GradientStrategy};
use super::gradient::{best_neighbor, discrete_gradient};
use super::report::{AscentStatus, Report};
use crate::error::{EvaluationError, SolveError};
use crate::model::{CompiledModel, Model};
use tracing::{debug, trace, warn};

/// Above this many variables the combinatorial sweep gets expensive.
const COMBINATORIAL_WARN_VARIABLES: usize = 12;

/// Executes discrete-gradient ascent.
pub struct AscentRunner;

impl AscentRunner {
    /// Solves `model` in place.
    ///
    /// The model's variable values are updated as moves are committed.
    /// If an expression fails mid-run the error is returned and the
    /// model keeps the moves committed so far.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError`](crate::error::ConfigurationError) for an
    ///   invalid config, a missing objective or an undeclared name, before
    ///   any iteration runs
    /// - [`EvaluationError`] from any objective or constraint evaluation
    pub fn run(model: &mut Model, config: &AscentConfig) -> Result<Report, SolveError> {
        config.validate()?;
        let problem = model.compile()?;
        let name = model.name().to_string();

        debug!(
            component = "ascent",
            operation = "solve",
            model = %name,
            variables = model.variable_count() as u64,
            constraints = problem.constraint_count() as u64,
            strategy = ?config.strategy,
            step_size = config.step_size,
            max_iterations = config.max_iterations as u64,
            min_iterations = config.min_iterations as u64,
            "Starting discrete ascent"
        );

        if config.strategy == GradientStrategy::CombinatorialNeighbor
            && model.variable_count() > COMBINATORIAL_WARN_VARIABLES
        {
            warn!(
                component = "ascent",
                operation = "solve",
                variables = model.variable_count() as u64,
                "Combinatorial neighbour search visits 3^n candidates per iteration"
            );
        }

        let values = model.values_mut();
        let mut objective_history = vec![problem.objective(values)?];
        let mut iteration = 0usize;
        let mut accepted_moves = 0usize;
        let mut status = AscentStatus::MaxIterationsReached;

        while iteration < config.max_iterations {
            iteration += 1;

            let moves = match config.strategy {
                GradientStrategy::CoordinateWise => {
                    coordinate_sweep(&problem, values, config.step_size)?
                }
                GradientStrategy::CombinatorialNeighbor => {
                    let next = best_neighbor(&problem, values, config.step_size)?;
                    if next[..] == values[..] {
                        0
                    } else {
                        values.copy_from_slice(&next);
                        1
                    }
                }
            };
            accepted_moves += moves;

            let objective = problem.objective(values)?;
            objective_history.push(objective);

            trace!(
                component = "ascent",
                iteration = iteration as u64,
                moves = moves as u64,
                objective,
                "Iteration finished"
            );

            if moves == 0 && iteration >= config.min_iterations {
                status = AscentStatus::Converged;
                break;
            }
        }

        let objective_value = objective_history.last().copied().unwrap_or_default();

        match status {
            AscentStatus::Converged => debug!(
                component = "ascent",
                operation = "solve",
                status = "converged",
                model = %name,
                iterations = iteration as u64,
                accepted_moves = accepted_moves as u64,
                objective = objective_value,
                "Discrete ascent finished"
            ),
            AscentStatus::MaxIterationsReached => warn!(
                component = "ascent",
                operation = "solve",
                status = "max_iterations",
                model = %name,
                iterations = iteration as u64,
                objective = objective_value,
                "Iteration budget exhausted before convergence"
            ),
        }

        Ok(Report {
            model: name,
            status,
            iterations: iteration,
            bindings: model.variables().clone(),
            objective_value,
            accepted_moves,
            objective_history,
        })
    }
}

/// One coordinate-wise pass. Returns the number of committed moves.
fn coordinate_sweep(
    problem: &CompiledModel,
    values: &mut [i64],
    step: i64,
) -> Result<usize, EvaluationError> {
    let gradient = discrete_gradient(problem, values)?;
    let mut candidate = values.to_vec();
    let mut moves = 0;

    for (i, &score) in gradient.iter().enumerate() {
        let current = values[i];
        let proposed = if score > 0.0 {
            current.saturating_add(step)
        } else if score < 0.0 {
            current.saturating_sub(step).max(0)
        } else {
            continue;
        };

        candidate[i] = proposed;
        if problem.is_feasible(&candidate)? && proposed != current {
            values[i] = proposed;
            moves += 1;
            trace!(
                component = "ascent",
                variable = i as u64,
                from = current,
                to = proposed,
                "Move accepted"
            );
        } else {
            candidate[i] = current;
        }
    }

    Ok(moves)
}
