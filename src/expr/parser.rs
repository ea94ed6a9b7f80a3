//! Recursive-descent parser.
//!
//! Grammar:
//!
//! ```text
//! relation := sum ( relop sum )*
//! sum      := product ( ("+" | "-") product )*
//! product  := unary ( ("*" | "/") unary )*
//! unary    := ("+" | "-") unary | primary
//! primary  := NUMBER | IDENT | "(" sum ")"
//! ```

use indexmap::IndexSet;

use super::ast::{ArithOp, Node, Term};
use super::lexer::{Lexer, SyntaxError, Token, TokenKind};

/// Nesting limit for parentheses and unary signs.
const MAX_DEPTH: usize = 128;

pub(crate) struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    /// Distinct variable names in order of first appearance.
    symbols: IndexSet<String>,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Result<Self, SyntaxError> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            symbols: IndexSet::new(),
            depth: 0,
        })
    }

    fn advance(&mut self) -> Result<Token, SyntaxError> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn unexpected(&self, wanted: &str) -> SyntaxError {
        SyntaxError::new(
            self.current.start,
            format!("expected {wanted}, found {}", self.current.kind.describe()),
        )
    }

    fn enter(&mut self) -> Result<(), SyntaxError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(SyntaxError::new(
                self.current.start,
                format!("expression nested deeper than {MAX_DEPTH} levels"),
            ));
        }
        Ok(())
    }

    fn symbol(&mut self, name: String) -> usize {
        self.symbols.insert_full(name).0
    }

    fn relation(&mut self) -> Result<Node, SyntaxError> {
        let first = self.sum()?;
        let mut rest = Vec::new();
        while let TokenKind::Cmp(op) = self.current.kind {
            self.advance()?;
            rest.push((op, self.sum()?));
        }

        if self.current.kind != TokenKind::Eof {
            return Err(self.unexpected("an operator or end of input"));
        }

        if rest.is_empty() {
            Ok(Node::Arith(first))
        } else {
            Ok(Node::Relation { first, rest })
        }
    }

    fn sum(&mut self) -> Result<Term, SyntaxError> {
        let first = self.product()?;
        let mut rest = Vec::new();
        loop {
            let op = match self.current.kind {
                TokenKind::Plus => ArithOp::Add,
                TokenKind::Minus => ArithOp::Sub,
                _ => return Ok(chain(first, rest)),
            };
            self.advance()?;
            rest.push((op, self.product()?));
        }
    }

    fn product(&mut self) -> Result<Term, SyntaxError> {
        let first = self.unary()?;
        let mut rest = Vec::new();
        loop {
            let op = match self.current.kind {
                TokenKind::Star => ArithOp::Mul,
                TokenKind::Slash => ArithOp::Div,
                _ => return Ok(chain(first, rest)),
            };
            self.advance()?;
            rest.push((op, self.unary()?));
        }
    }

    fn unary(&mut self) -> Result<Term, SyntaxError> {
        let negate = match self.current.kind {
            TokenKind::Minus => true,
            TokenKind::Plus => false,
            _ => return self.primary(),
        };
        self.advance()?;
        self.enter()?;
        let operand = self.unary()?;
        self.depth -= 1;
        Ok(if negate {
            Term::Neg(Box::new(operand))
        } else {
            operand
        })
    }

    fn primary(&mut self) -> Result<Term, SyntaxError> {
        match self.current.kind.clone() {
            TokenKind::Number(n) => {
                self.advance()?;
                Ok(Term::Number(n))
            }
            TokenKind::Ident(name) => {
                self.advance()?;
                Ok(Term::Variable(self.symbol(name)))
            }
            TokenKind::LParen => {
                self.advance()?;
                self.enter()?;
                let inner = self.sum()?;
                self.depth -= 1;
                match self.current.kind {
                    TokenKind::RParen => {
                        self.advance()?;
                        Ok(inner)
                    }
                    TokenKind::Cmp(op) => Err(SyntaxError::new(
                        self.current.start,
                        format!("relational `{}` is not allowed inside parentheses", op.symbol()),
                    )),
                    _ => Err(self.unexpected("`)`")),
                }
            }
            _ => Err(self.unexpected("a number, a variable or `(`")),
        }
    }
}

fn chain(first: Term, rest: Vec<(ArithOp, Term)>) -> Term {
    if rest.is_empty() {
        first
    } else {
        Term::Chain {
            first: Box::new(first),
            rest,
        }
    }
}

/// Parses `input` into a tree plus its symbol table.
pub(crate) fn parse(input: &str) -> Result<(Node, Vec<String>), SyntaxError> {
    let mut parser = Parser::new(input)?;
    if parser.current.kind == TokenKind::Eof {
        return Err(SyntaxError::new(0, "empty expression"));
    }
    let node = parser.relation()?;
    Ok((node, parser.symbols.into_iter().collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::ast::CmpOp;

    #[test]
    fn test_precedence() {
        let (node, symbols) = parse("1 + 2 * x").unwrap();
        assert_eq!(symbols, vec!["x".to_string()]);
        let Node::Arith(term) = node else {
            panic!("expected arithmetic");
        };
        assert_eq!(term.eval(&|_| Some(3.0)), Ok(7.0));
    }

    #[test]
    fn test_left_associative() {
        let (node, _) = parse("8 - 4 - 2").unwrap();
        let Node::Arith(term) = node else {
            panic!("expected arithmetic");
        };
        assert_eq!(term.eval(&|_| None), Ok(2.0));

        let (node, _) = parse("8 / 4 / 2").unwrap();
        let Node::Arith(term) = node else {
            panic!("expected arithmetic");
        };
        assert_eq!(term.eval(&|_| None), Ok(1.0));
    }

    #[test]
    fn test_operator_runs_are_flat() {
        let (node, _) = parse("1 + 2 - 3 + x").unwrap();
        let Node::Arith(Term::Chain { first, rest }) = node else {
            panic!("expected a chain");
        };
        assert_eq!(*first, Term::Number(1.0));
        assert_eq!(rest.len(), 3);
        assert!(rest.iter().all(|(_, t)| !matches!(t, Term::Chain { .. })));

        let (node, _) = parse("x").unwrap();
        assert_eq!(node, Node::Arith(Term::Variable(0)));
    }

    #[test]
    fn test_grouping_and_unary() {
        let (node, _) = parse("-(2 + 3) * +2").unwrap();
        let Node::Arith(term) = node else {
            panic!("expected arithmetic");
        };
        assert_eq!(term.eval(&|_| None), Ok(-10.0));
    }

    #[test]
    fn test_relation() {
        let (node, symbols) = parse("9*x1 + x2 <= 18").unwrap();
        assert_eq!(symbols, vec!["x1".to_string(), "x2".to_string()]);
        match node {
            Node::Relation { rest, .. } => {
                assert_eq!(rest.len(), 1);
                assert_eq!(rest[0].0, CmpOp::Le);
            }
            Node::Arith(_) => panic!("expected relation"),
        }
    }

    #[test]
    fn test_repeated_symbol_interned_once() {
        let (_, symbols) = parse("x + x * y - x").unwrap();
        assert_eq!(symbols, vec!["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn test_relation_inside_parens_rejected() {
        let err = parse("(x <= 3) * 2").unwrap_err();
        assert_eq!(err.position, 3);
    }

    #[test]
    fn test_malformed() {
        assert!(parse("").is_err());
        assert!(parse("   ").is_err());
        assert!(parse("4 *").is_err());
        assert!(parse("(x + 1").is_err());
        assert!(parse("x + 1)").is_err());
        assert!(parse("x <=").is_err());
        assert!(parse("x y").is_err());
    }

    #[test]
    fn test_depth_limit() {
        let deep = format!("{}x{}", "(".repeat(MAX_DEPTH + 1), ")".repeat(MAX_DEPTH + 1));
        assert!(parse(&deep).is_err());

        let shallow = format!("{}x{}", "(".repeat(10), ")".repeat(10));
        assert!(parse(&shallow).is_ok());

        let signs = format!("{}x", "-".repeat(MAX_DEPTH + 1));
        assert!(parse(&signs).is_err());
    }
}
