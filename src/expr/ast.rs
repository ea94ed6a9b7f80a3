//! Typed expression tree and its evaluator.
//!
//! Arithmetic and relations live in separate node types, so a parsed
//! tree is either numeric or boolean by construction. The only
//! operation that touches the outside world is the variable lookup
//! callback handed to [`Term::eval`].

/// Arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithOp {
    fn apply(self, lhs: f64, rhs: f64) -> Result<f64, Fault> {
        match self {
            ArithOp::Add => Ok(lhs + rhs),
            ArithOp::Sub => Ok(lhs - rhs),
            ArithOp::Mul => Ok(lhs * rhs),
            ArithOp::Div if rhs == 0.0 => Err(Fault::DivisionByZero),
            ArithOp::Div => Ok(lhs / rhs),
        }
    }
}

/// Relational operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CmpOp {
    Le,
    Ge,
    Lt,
    Gt,
    Eq,
}

impl CmpOp {
    pub(crate) fn symbol(self) -> &'static str {
        match self {
            CmpOp::Le => "<=",
            CmpOp::Ge => ">=",
            CmpOp::Lt => "<",
            CmpOp::Gt => ">",
            CmpOp::Eq => "==",
        }
    }

    pub(crate) fn apply(self, lhs: f64, rhs: f64) -> bool {
        match self {
            CmpOp::Le => lhs <= rhs,
            CmpOp::Ge => lhs >= rhs,
            CmpOp::Lt => lhs < rhs,
            CmpOp::Gt => lhs > rhs,
            CmpOp::Eq => lhs == rhs,
        }
    }
}

/// Why a well-formed tree failed to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fault {
    DivisionByZero,
    /// Symbol index with no value behind it.
    Missing(usize),
}

/// Arithmetic subtree. `Variable` indexes the owning expression's symbol table.
///
/// Runs of same-precedence operators are stored flat in a [`Term::Chain`],
/// so tree depth grows with parentheses and signs only, never with the
/// number of operands.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Term {
    Number(f64),
    Variable(usize),
    Neg(Box<Term>),
    /// `first op1 t1 op2 t2 ...`, folded left to right.
    Chain {
        first: Box<Term>,
        rest: Vec<(ArithOp, Term)>,
    },
}

impl Term {
    pub(crate) fn eval<F>(&self, value_of: &F) -> Result<f64, Fault>
    where
        F: Fn(usize) -> Option<f64>,
    {
        match self {
            Term::Number(n) => Ok(*n),
            Term::Variable(symbol) => value_of(*symbol).ok_or(Fault::Missing(*symbol)),
            Term::Neg(inner) => Ok(-inner.eval(value_of)?),
            Term::Chain { first, rest } => {
                let mut acc = first.eval(value_of)?;
                for (op, term) in rest {
                    acc = op.apply(acc, term.eval(value_of)?)?;
                }
                Ok(acc)
            }
        }
    }
}

/// Root of a parsed expression.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Arith(Term),
    /// `first op1 t1 op2 t2 ...`, true when every adjacent pair holds.
    Relation {
        first: Term,
        rest: Vec<(CmpOp, Term)>,
    },
}

impl Node {
    pub(crate) fn eval<F>(&self, value_of: &F) -> Result<super::Value, Fault>
    where
        F: Fn(usize) -> Option<f64>,
    {
        match self {
            Node::Arith(term) => term.eval(value_of).map(super::Value::Number),
            Node::Relation { first, rest } => {
                let mut lhs = first.eval(value_of)?;
                for (op, term) in rest {
                    let rhs = term.eval(value_of)?;
                    if !op.apply(lhs, rhs) {
                        return Ok(super::Value::Bool(false));
                    }
                    lhs = rhs;
                }
                Ok(super::Value::Bool(true))
            }
        }
    }
}
