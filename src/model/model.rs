//! Optimization model definition.

use super::bindings::Bindings;
use super::compiled::CompiledModel;
use crate::ascent::{discrete_gradient, AscentConfig, AscentRunner, Report};
use crate::error::{EvaluationError, SolveError};
use crate::expr::{self, Value};
use tracing::{debug, warn};

/// An integer maximization model.
///
/// Holds non-negative integer variables in registration order, one
/// objective expression to maximize and an ordered list of constraint
/// relations. Expressions are stored as text and checked when the
/// model is solved, so they may be registered before the variables they
/// mention.
///
/// Solving mutates the variable values in place; a second
/// [`solve`](Model::solve) continues from wherever the first one stopped.
///
/// # Examples
///
/// ```
/// use u_discrete_ascent::ascent::AscentConfig;
/// use u_discrete_ascent::model::Model;
///
/// let mut model = Model::new("integer maximization");
/// model.integer_var("x1", 0);
/// model.integer_var("x2", 0);
/// model.maximize("4*x1 + x2");
/// model.add_constraint("9*x1 + x2 <= 18");
/// model.add_constraint("3*x1 + x2 <= 12");
///
/// let report = model.solve(&AscentConfig::default()).unwrap();
/// assert!(report.objective_value >= 8.0);
/// assert!(model.is_feasible().unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Model {
    name: String,
    variables: Bindings,
    objective: Option<String>,
    constraints: Vec<String>,
}

impl Model {
    /// Creates an empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: Bindings::new(),
            objective: None,
            constraints: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declares an integer variable. Negative initial values are clamped
    /// to 0. Declaring an existing name again resets its value but keeps
    /// its position in the iteration order.
    pub fn declare_variable(&mut self, name: impl Into<String>, initial_value: i64) {
        let name = name.into();
        let value = initial_value.max(0);
        if let Some(previous) = self.variables.insert(name.clone(), value) {
            debug!(
                component = "model",
                operation = "declare_variable",
                variable = %name,
                previous,
                value,
                "Variable redeclared"
            );
        }
    }

    /// Alias of [`declare_variable`](Model::declare_variable).
    pub fn integer_var(&mut self, name: impl Into<String>, initial_value: i64) {
        self.declare_variable(name, initial_value);
    }

    /// Sets the expression to maximize, replacing any previous one.
    pub fn set_objective(&mut self, expression: impl Into<String>) {
        let expression = expression.into();
        if let Some(previous) = &self.objective {
            warn!(
                component = "model",
                operation = "set_objective",
                model = %self.name,
                previous = %previous,
                replacement = %expression,
                "Replacing objective"
            );
        }
        self.objective = Some(expression);
    }

    /// Alias of [`set_objective`](Model::set_objective).
    pub fn maximize(&mut self, expression: impl Into<String>) {
        self.set_objective(expression);
    }

    /// Appends a constraint relation, e.g. `"9*x1 + x2 <= 18"`.
    pub fn add_constraint(&mut self, expression: impl Into<String>) {
        self.constraints.push(expression.into());
    }

    /// Current variable values in registration order.
    pub fn variables(&self) -> &Bindings {
        &self.variables
    }

    pub fn value(&self, name: &str) -> Option<i64> {
        self.variables.get(name)
    }

    pub fn objective(&self) -> Option<&str> {
        self.objective.as_deref()
    }

    pub fn constraints(&self) -> &[String] {
        &self.constraints
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Parses, type-checks and binds the objective and constraints.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError`](crate::error::ConfigurationError) when the
    /// objective is unset or a name is undeclared;
    /// [`EvaluationError`] when an expression is malformed or has the
    /// wrong kind.
    pub fn compile(&self) -> Result<CompiledModel, SolveError> {
        CompiledModel::new(
            self.objective.as_deref(),
            &self.constraints,
            self.variables.names(),
        )
    }

    /// Checks the model without solving it.
    pub fn validate(&self) -> Result<(), SolveError> {
        self.compile().map(|_| ())
    }

    /// Objective value at the current binding.
    pub fn objective_value(&self) -> Result<f64, SolveError> {
        Ok(self.compile()?.objective(self.variables.values())?)
    }

    /// Whether every constraint holds at the current binding.
    pub fn is_feasible(&self) -> Result<bool, SolveError> {
        Ok(self.compile()?.is_feasible(self.variables.values())?)
    }

    /// Coordinate-wise discrete gradient at the current binding, as
    /// `(name, objective(+1) - objective(-1))` pairs.
    pub fn gradient(&self) -> Result<Vec<(String, f64)>, SolveError> {
        let compiled = self.compile()?;
        let scores = discrete_gradient(&compiled, self.variables.values())?;
        Ok(self
            .variables
            .names()
            .iter()
            .cloned()
            .zip(scores)
            .collect())
    }

    /// Evaluates an arbitrary expression against `bindings`.
    ///
    /// This is the model-level `evaluate(model, expression, bindings)`
    /// entry point. The model itself is not read: only `bindings` supply
    /// values, so it behaves exactly like [`expr::evaluate`].
    pub fn evaluate(&self, expression: &str, bindings: &Bindings) -> Result<Value, EvaluationError> {
        expr::evaluate(expression, bindings)
    }

    /// Runs discrete-gradient ascent, updating variable values in place.
    ///
    /// See [`AscentRunner::run`].
    pub fn solve(&mut self, config: &AscentConfig) -> Result<Report, SolveError> {
        AscentRunner::run(self, config)
    }

    pub(crate) fn values_mut(&mut self) -> &mut [i64] {
        self.variables.values_mut()
    }
}
