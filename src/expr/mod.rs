//! Restricted arithmetic/relational expression language.
//!
//! Expressions are parsed into a typed tree and evaluated by a visitor
//! that knows only numeric literals, variable lookups, the operators
//! `+ - * /` and the relations `<= >= < > ==`. Nothing else is
//! reachable from expression text: no function calls, no attribute
//! access, no ambient names.
//!
//! Relations may be chained (`0 <= x <= 5`), meaning every adjacent
//! comparison holds. Relations cannot appear inside arithmetic or
//! parentheses, so every expression is either numeric or boolean as
//! soon as it parses.

mod ast;
mod lexer;
mod parser;

use crate::error::{ConfigurationError, EvaluationError};
use crate::model::Bindings;
use ast::{Fault, Node};
use indexmap::IndexSet;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of evaluating an expression.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    Number(f64),
    Bool(bool),
}

impl Value {
    /// The numeric value, if this is a number.
    pub fn as_number(self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n),
            Value::Bool(_) => None,
        }
    }

    /// The truth value, if this is a boolean.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(b),
            Value::Number(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Whether an expression yields a number or a truth value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprKind {
    Numeric,
    Relational,
}

impl ExprKind {
    fn describe(self) -> &'static str {
        match self {
            ExprKind::Numeric => "a numeric expression",
            ExprKind::Relational => "a relation",
        }
    }
}

/// A name used by an expression that is missing from the binding set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnboundName {
    pub expression: String,
    pub name: String,
}

impl From<UnboundName> for EvaluationError {
    fn from(u: UnboundName) -> Self {
        EvaluationError::UnresolvedVariable {
            expression: u.expression,
            name: u.name,
        }
    }
}

impl From<UnboundName> for ConfigurationError {
    fn from(u: UnboundName) -> Self {
        ConfigurationError::UndeclaredVariable {
            expression: u.expression,
            name: u.name,
        }
    }
}

/// A parsed expression, not yet tied to any variable set.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    node: Node,
    symbols: Vec<String>,
}

impl Expression {
    /// Parses expression text.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::Syntax`] when the text is malformed.
    pub fn parse(source: impl Into<String>) -> Result<Self, EvaluationError> {
        let source = source.into();
        match parser::parse(&source) {
            Ok((node, symbols)) => Ok(Self {
                source,
                node,
                symbols,
            }),
            Err(e) => Err(EvaluationError::Syntax {
                expression: source,
                position: e.position,
                message: e.message,
            }),
        }
    }

    /// The original text.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn kind(&self) -> ExprKind {
        match self.node {
            Node::Arith(_) => ExprKind::Numeric,
            Node::Relation { .. } => ExprKind::Relational,
        }
    }

    /// Variable names, in order of first appearance.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }

    /// Fails with [`EvaluationError::TypeMismatch`] unless the expression has `kind`.
    pub fn expect_kind(&self, kind: ExprKind) -> Result<(), EvaluationError> {
        if self.kind() == kind {
            Ok(())
        } else {
            Err(EvaluationError::TypeMismatch {
                expression: self.source.clone(),
                expected: kind.describe(),
                found: self.kind().describe(),
            })
        }
    }

    /// Resolves every variable against `names`, producing an expression
    /// that evaluates over value slices aligned with `names`.
    pub fn bind(self, names: &IndexSet<String>) -> Result<BoundExpression, UnboundName> {
        let mut slots = Vec::with_capacity(self.symbols.len());
        for symbol in &self.symbols {
            match names.get_index_of(symbol) {
                Some(slot) => slots.push(slot),
                None => {
                    return Err(UnboundName {
                        expression: self.source.clone(),
                        name: symbol.clone(),
                    })
                }
            }
        }
        Ok(BoundExpression { expr: self, slots })
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// An expression whose variables are resolved to positions in a value slice.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundExpression {
    expr: Expression,
    /// `slots[symbol]` is the value index for that symbol.
    slots: Vec<usize>,
}

impl BoundExpression {
    pub fn source(&self) -> &str {
        self.expr.source()
    }

    pub fn kind(&self) -> ExprKind {
        self.expr.kind()
    }

    /// Evaluates against `values`, which must be laid out like the names
    /// this expression was bound to.
    pub fn eval(&self, values: &[i64]) -> Result<Value, EvaluationError> {
        let value_of = |symbol: usize| {
            self.slots
                .get(symbol)
                .and_then(|&slot| values.get(slot))
                .map(|&v| v as f64)
        };
        self.expr.node.eval(&value_of).map_err(|fault| match fault {
            Fault::DivisionByZero => EvaluationError::DivisionByZero {
                expression: self.expr.source.clone(),
            },
            Fault::Missing(symbol) => EvaluationError::UnresolvedVariable {
                expression: self.expr.source.clone(),
                name: self.expr.symbols.get(symbol).cloned().unwrap_or_default(),
            },
        })
    }

    /// Evaluates a numeric expression.
    pub fn number(&self, values: &[i64]) -> Result<f64, EvaluationError> {
        self.expr.expect_kind(ExprKind::Numeric)?;
        match self.eval(values)? {
            Value::Number(n) => Ok(n),
            Value::Bool(_) => Err(self.mismatch(ExprKind::Numeric)),
        }
    }

    /// Evaluates a relation.
    pub fn holds(&self, values: &[i64]) -> Result<bool, EvaluationError> {
        self.expr.expect_kind(ExprKind::Relational)?;
        match self.eval(values)? {
            Value::Bool(b) => Ok(b),
            Value::Number(_) => Err(self.mismatch(ExprKind::Relational)),
        }
    }

    fn mismatch(&self, expected: ExprKind) -> EvaluationError {
        EvaluationError::TypeMismatch {
            expression: self.expr.source.clone(),
            expected: expected.describe(),
            found: self.kind().describe(),
        }
    }
}

/// Evaluates `expression` against `bindings`.
///
/// # Examples
///
/// ```
/// use u_discrete_ascent::expr::{evaluate, Value};
/// use u_discrete_ascent::model::Bindings;
///
/// let mut bindings = Bindings::new();
/// bindings.insert("x1", 2);
/// bindings.insert("x2", 3);
///
/// assert_eq!(evaluate("4*x1 + x2", &bindings).unwrap(), Value::Number(11.0));
/// assert_eq!(evaluate("9*x1 + x2 <= 18", &bindings).unwrap(), Value::Bool(false));
/// ```
///
/// # Errors
///
/// Returns an [`EvaluationError`] for malformed text, names missing from
/// `bindings`, or division by zero.
pub fn evaluate(expression: &str, bindings: &Bindings) -> Result<Value, EvaluationError> {
    let bound = Expression::parse(expression)?.bind(bindings.names())?;
    bound.eval(bindings.values())
}
