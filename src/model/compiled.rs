//! Objective and constraints resolved against a model's variable slots.

use crate::error::{ConfigurationError, EvaluationError, SolveError};
use crate::expr::{BoundExpression, ExprKind, Expression};
use indexmap::IndexSet;

/// A model's expressions, parsed, type-checked and bound to the
/// model's variable order.
///
/// Built once per solve; evaluation then works on plain value slices.
#[derive(Debug, Clone)]
pub struct CompiledModel {
    objective: BoundExpression,
    constraints: Vec<BoundExpression>,
}

impl CompiledModel {
    pub(crate) fn new(
        objective: Option<&str>,
        constraints: &[String],
        names: &IndexSet<String>,
    ) -> Result<Self, SolveError> {
        let objective = objective.ok_or(ConfigurationError::MissingObjective)?;
        let objective = compile(objective, ExprKind::Numeric, names)?;
        let constraints = constraints
            .iter()
            .map(|c| compile(c, ExprKind::Relational, names))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            objective,
            constraints,
        })
    }

    /// Objective value at `values`.
    pub fn objective(&self, values: &[i64]) -> Result<f64, EvaluationError> {
        self.objective.number(values)
    }

    /// True when every constraint holds at `values`.
    ///
    /// Constraints are checked in registration order and the check stops
    /// at the first one that fails. Errors are returned as-is, never
    /// counted as infeasible.
    pub fn is_feasible(&self, values: &[i64]) -> Result<bool, EvaluationError> {
        for constraint in &self.constraints {
            if !constraint.holds(values)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }
}

fn compile(
    source: &str,
    kind: ExprKind,
    names: &IndexSet<String>,
) -> Result<BoundExpression, SolveError> {
    let expr = Expression::parse(source)?;
    expr.expect_kind(kind)?;
    Ok(expr.bind(names).map_err(ConfigurationError::from)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> IndexSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_compile_and_evaluate() {
        let constraints = vec!["9*x1 + x2 <= 18".to_string(), "3*x1 + x2 <= 12".to_string()];
        let compiled =
            CompiledModel::new(Some("4*x1 + x2"), &constraints, &names(&["x1", "x2"])).unwrap();

        assert_eq!(compiled.constraint_count(), 2);
        assert_eq!(compiled.objective(&[2, 0]), Ok(8.0));
        assert_eq!(compiled.is_feasible(&[2, 0]), Ok(true));
        assert_eq!(compiled.is_feasible(&[2, 1]), Ok(false));
        assert_eq!(compiled.is_feasible(&[0, 12]), Ok(true));
        assert_eq!(compiled.is_feasible(&[0, 13]), Ok(false));
    }

    #[test]
    fn test_missing_objective() {
        let err = CompiledModel::new(None, &[], &names(&["x1"])).unwrap_err();
        assert_eq!(
            err,
            SolveError::Configuration(ConfigurationError::MissingObjective)
        );
    }

    #[test]
    fn test_undeclared_variable() {
        let err = CompiledModel::new(Some("x1 + y"), &[], &names(&["x1"])).unwrap_err();
        assert_eq!(
            err,
            SolveError::Configuration(ConfigurationError::UndeclaredVariable {
                expression: "x1 + y".into(),
                name: "y".into(),
            })
        );

        let constraints = vec!["x1 + z <= 3".to_string()];
        let err = CompiledModel::new(Some("x1"), &constraints, &names(&["x1"])).unwrap_err();
        assert!(matches!(
            err,
            SolveError::Configuration(ConfigurationError::UndeclaredVariable { .. })
        ));
    }

    #[test]
    fn test_kind_mismatch() {
        let err = CompiledModel::new(Some("x1 <= 3"), &[], &names(&["x1"])).unwrap_err();
        assert!(matches!(
            err,
            SolveError::Evaluation(EvaluationError::TypeMismatch { .. })
        ));

        let constraints = vec!["x1 + 3".to_string()];
        let err = CompiledModel::new(Some("x1"), &constraints, &names(&["x1"])).unwrap_err();
        assert!(matches!(
            err,
            SolveError::Evaluation(EvaluationError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_constraint_error_propagates() {
        let constraints = vec!["x1/0 <= 1".to_string()];
        let compiled = CompiledModel::new(Some("x1"), &constraints, &names(&["x1"])).unwrap();
        assert!(matches!(
            compiled.is_feasible(&[1]),
            Err(EvaluationError::DivisionByZero { .. })
        ));
    }
}
