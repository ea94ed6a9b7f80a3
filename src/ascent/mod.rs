//! Discrete-gradient ascent.
//!
//! A local hill climber for integer maximization: each iteration
//! estimates, per variable, whether a unit increase or decrease raises
//! the objective, then takes steps in those directions as long as every
//! constraint keeps holding. There is no optimality guarantee; the
//! search stops at the first binding where no step is both improving
//! in sign and feasible.
//!
//! Two strategies are available through [`GradientStrategy`]:
//!
//! - **CoordinateWise** (default): finite-difference scores, one step
//!   per variable per iteration, `O(n)` evaluations.
//! - **CombinatorialNeighbor**: sweep of all `3^n` sign vectors,
//!   accepting strict improvements. Small problems only.

mod config;
mod gradient;
mod report;
mod runner;

pub use config::{AscentConfig, GradientStrategy};
pub use gradient::{best_neighbor, discrete_gradient};
pub use report::{AscentStatus, Report};
pub use runner::AscentRunner;
