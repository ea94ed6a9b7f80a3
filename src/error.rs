//! Error taxonomy.
//!
//! Evaluation failures come from the expression layer and propagate
//! unchanged through gradient computation and the ascent loop.
//! Configuration failures are detected before the first iteration.

use thiserror::Error;

/// Failure while parsing or evaluating an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    /// The expression text is malformed.
    #[error("syntax error in `{expression}` at offset {position}: {message}")]
    Syntax {
        expression: String,
        position: usize,
        message: String,
    },

    /// A name in the expression has no value in the bindings.
    #[error("unresolved variable `{name}` in `{expression}`")]
    UnresolvedVariable { expression: String, name: String },

    /// A divisor evaluated to zero.
    #[error("division by zero in `{expression}`")]
    DivisionByZero { expression: String },

    /// A numeric expression was used where a relation is required, or
    /// the other way round.
    #[error("type mismatch in `{expression}`: expected {expected}, found {found}")]
    TypeMismatch {
        expression: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Failure in how a model or solver was set up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// `solve` was called before an objective was set.
    #[error("no objective set")]
    MissingObjective,

    /// An objective or constraint names a variable the model never declared.
    #[error("`{expression}` references undeclared variable `{name}`")]
    UndeclaredVariable { expression: String, name: String },

    /// A solver parameter is out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Any failure surfaced by [`Model::solve`](crate::model::Model::solve).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}
