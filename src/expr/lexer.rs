//! Tokenizer for the arithmetic/relational expression language.

use super::ast::CmpOp;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    Cmp(CmpOp),
    Eof,
}

impl TokenKind {
    /// Short human-readable form for error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            TokenKind::Number(n) => format!("number `{n}`"),
            TokenKind::Ident(name) => format!("identifier `{name}`"),
            TokenKind::Plus => "`+`".into(),
            TokenKind::Minus => "`-`".into(),
            TokenKind::Star => "`*`".into(),
            TokenKind::Slash => "`/`".into(),
            TokenKind::LParen => "`(`".into(),
            TokenKind::RParen => "`)`".into(),
            TokenKind::Cmp(op) => format!("`{}`", op.symbol()),
            TokenKind::Eof => "end of input".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    /// Byte offset of the first character.
    pub start: usize,
}

/// Position and reason of a tokenizing or parsing failure.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SyntaxError {
    pub position: usize,
    pub message: String,
}

impl SyntaxError {
    pub(crate) fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

pub(crate) struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.as_bytes().get(self.pos + offset).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    pub(crate) fn next_token(&mut self) -> Result<Token, SyntaxError> {
        self.skip_whitespace();
        let start = self.pos;

        let Some(byte) = self.peek() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                start,
            });
        };

        let kind = match byte {
            b'0'..=b'9' | b'.' => return self.number(start),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => return Ok(self.ident(start)),
            b'+' => self.single(TokenKind::Plus),
            b'-' => self.single(TokenKind::Minus),
            b'*' => self.single(TokenKind::Star),
            b'/' => self.single(TokenKind::Slash),
            b'(' => self.single(TokenKind::LParen),
            b')' => self.single(TokenKind::RParen),
            b'<' | b'>' | b'=' => self.comparison(start)?,
            _ => {
                let ch = self.input[start..].chars().next().unwrap_or('?');
                return Err(SyntaxError::new(
                    start,
                    format!("unexpected character `{ch}`"),
                ));
            }
        };

        Ok(Token { kind, start })
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.pos += 1;
        kind
    }

    fn comparison(&mut self, start: usize) -> Result<TokenKind, SyntaxError> {
        let first = self.peek();
        let followed_by_eq = self.peek_at(1) == Some(b'=');
        let (op, width) = match (first, followed_by_eq) {
            (Some(b'<'), true) => (CmpOp::Le, 2),
            (Some(b'>'), true) => (CmpOp::Ge, 2),
            (Some(b'='), true) => (CmpOp::Eq, 2),
            (Some(b'<'), false) => (CmpOp::Lt, 1),
            (Some(b'>'), false) => (CmpOp::Gt, 1),
            _ => {
                return Err(SyntaxError::new(
                    start,
                    "assignment `=` is not allowed, use `==`",
                ))
            }
        };
        self.pos += width;
        Ok(TokenKind::Cmp(op))
    }

    fn number(&mut self, start: usize) -> Result<Token, SyntaxError> {
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        if self.peek() == Some(b'.') {
            self.pos += 1;
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
            }
        }

        let text = &self.input[start..self.pos];
        let value: f64 = text
            .parse()
            .map_err(|_| SyntaxError::new(start, format!("invalid number `{text}`")))?;

        if matches!(self.peek(), Some(b) if b.is_ascii_alphabetic() || b == b'_') {
            return Err(SyntaxError::new(
                self.pos,
                format!("number `{text}` is directly followed by a name"),
            ));
        }

        Ok(Token {
            kind: TokenKind::Number(value),
            start,
        })
    }

    fn ident(&mut self, start: usize) -> Token {
        while matches!(self.peek(), Some(b) if b.is_ascii_alphanumeric() || b == b'_') {
            self.pos += 1;
        }
        Token {
            kind: TokenKind::Ident(self.input[start..self.pos].to_string()),
            start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(input);
        let mut out = Vec::new();
        loop {
            let token = lexer.next_token().unwrap();
            if token.kind == TokenKind::Eof {
                break;
            }
            out.push(token.kind);
        }
        out
    }

    #[test]
    fn test_tokens() {
        assert_eq!(
            kinds("4*x1 + x_2"),
            vec![
                TokenKind::Number(4.0),
                TokenKind::Star,
                TokenKind::Ident("x1".into()),
                TokenKind::Plus,
                TokenKind::Ident("x_2".into()),
            ]
        );
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(
            kinds("<= >= < > =="),
            vec![
                TokenKind::Cmp(CmpOp::Le),
                TokenKind::Cmp(CmpOp::Ge),
                TokenKind::Cmp(CmpOp::Lt),
                TokenKind::Cmp(CmpOp::Gt),
                TokenKind::Cmp(CmpOp::Eq),
            ]
        );
    }

    #[test]
    fn test_decimal_numbers() {
        assert_eq!(
            kinds("0.5 .25 3."),
            vec![
                TokenKind::Number(0.5),
                TokenKind::Number(0.25),
                TokenKind::Number(3.0),
            ]
        );
    }

    #[test]
    fn test_single_equals_rejected() {
        let mut lexer = Lexer::new("x = 3");
        lexer.next_token().unwrap();
        let err = lexer.next_token().unwrap_err();
        assert_eq!(err.position, 2);
    }

    #[test]
    fn test_unexpected_character() {
        let mut lexer = Lexer::new("x1 ^ 2");
        lexer.next_token().unwrap();
        let err = lexer.next_token().unwrap_err();
        assert_eq!(err.position, 3);
        assert!(err.message.contains('^'));
    }

    #[test]
    fn test_lone_dot_rejected() {
        assert!(Lexer::new(".").next_token().is_err());
    }

    #[test]
    fn test_number_glued_to_name_rejected() {
        assert!(Lexer::new("4x1").next_token().is_err());
    }
}
