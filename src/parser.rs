//! Recursive-descent parser over the token stream produced by
//! [`crate::lexer::Lexer`], building the AST in [`crate::ast`].
//!
//! Grounded on `dust-lang`'s `parser/mod.rs` (a `Parser` holding a token
//! cursor with `advance`/`expect`/`peek`, recursive-descent expression
//! parsing by precedence tier) — adapted to this grammar's indentation
//! blocks rather than brace delimiters.

use crate::ast::{ArithOp, CompareOp, Expr, Program, Stmt};
use crate::errors::{SymError, SymResult};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Lexes and parses `source` in one step.
    pub fn parse_source(source: &str) -> SymResult<Program> {
        let tokens = Lexer::new(source).tokenize()?;
        Parser::new(tokens).parse_program()
    }

    fn peek(&self) -> &TokenKind {
        &self.tokens[self.pos].kind
    }

    fn line(&self) -> usize {
        self.tokens[self.pos].line
    }

    fn advance(&mut self) -> TokenKind {
        let tok = self.tokens[self.pos].kind.clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, expected: &TokenKind) -> SymResult<()> {
        if self.peek() == expected {
            self.advance();
            Ok(())
        } else {
            Err(SymError::Syntax {
                line: self.line(),
                message: format!("expected {expected:?}, found {:?}", self.peek()),
            })
        }
    }

    /// Consumes zero or more blank-statement newlines.
    fn skip_newlines(&mut self) {
        while self.peek() == &TokenKind::Newline {
            self.advance();
        }
    }

    pub fn parse_program(&mut self) -> SymResult<Program> {
        let mut body = Vec::new();
        self.skip_newlines();
        while self.peek() != &TokenKind::Eof {
            body.push(self.parse_stmt()?);
            self.skip_newlines();
        }
        Ok(Program { body })
    }

    fn parse_block(&mut self) -> SymResult<Vec<Stmt>> {
        self.expect(&TokenKind::Newline)?;
        self.expect(&TokenKind::Indent)?;
        let mut body = Vec::new();
        self.skip_newlines();
        while self.peek() != &TokenKind::Dedent {
            body.push(self.parse_stmt()?);
            self.skip_newlines();
        }
        self.expect(&TokenKind::Dedent)?;
        if body.is_empty() {
            return Err(SymError::Syntax {
                line: self.line(),
                message: "empty if-body".into(),
            });
        }
        Ok(body)
    }

    fn parse_stmt(&mut self) -> SymResult<Stmt> {
        match self.peek().clone() {
            TokenKind::KwIf => self.parse_if(),
            TokenKind::KwPrint => {
                self.advance();
                self.expect(&TokenKind::Newline)?;
                Ok(Stmt::Print)
            }
            TokenKind::KwAssert => self.parse_assert(),
            TokenKind::Ident(name) => self.parse_assign(name),
            other => Err(SymError::Syntax {
                line: self.line(),
                message: format!("unexpected token at statement start: {other:?}"),
            }),
        }
    }

    fn parse_assign(&mut self, target: String) -> SymResult<Stmt> {
        self.advance(); // the identifier
        self.expect(&TokenKind::Equals)?;
        let value = self.parse_expr()?;
        self.expect(&TokenKind::Newline)?;
        Ok(Stmt::Assign { target, value })
    }

    fn parse_if(&mut self) -> SymResult<Stmt> {
        self.advance(); // 'if'
        let test = self.parse_bool_expr()?;
        self.expect(&TokenKind::Colon)?;
        let body = self.parse_block()?;
        Ok(Stmt::If { test, body })
    }

    fn parse_assert(&mut self) -> SymResult<Stmt> {
        self.advance(); // 'assert'
        // Any nontrivial argument is accepted and ignored by the core
        // (§4.D, §9): `assert False` and `assert <anything>` both route to
        // the unconditional error marker.
        let value = match self.peek() {
            TokenKind::Newline => Expr::IntLiteral(0),
            _ => self.parse_bool_or_expr()?,
        };
        self.expect(&TokenKind::Newline)?;
        Ok(Stmt::Assert { value })
    }

    /// `assert`'s argument may be the `False`/`True` keyword or a general
    /// expression; neither form is evaluated (§4.D).
    fn parse_bool_or_expr(&mut self) -> SymResult<Expr> {
        match self.peek() {
            TokenKind::KwFalse => {
                self.advance();
                Ok(Expr::IntLiteral(0))
            }
            TokenKind::KwTrue => {
                self.advance();
                Ok(Expr::IntLiteral(1))
            }
            _ => self.parse_expr(),
        }
    }

    /// `bool_expr := compare ( 'and' compare )*`
    fn parse_bool_expr(&mut self) -> SymResult<Expr> {
        let mut members = vec![self.parse_compare()?];
        while self.peek() == &TokenKind::KwAnd {
            self.advance();
            members.push(self.parse_compare()?);
        }
        if members.len() == 1 {
            Ok(members.pop().unwrap())
        } else {
            Ok(Expr::BoolAnd(members))
        }
    }

    /// `compare := expr cmp_op expr`
    fn parse_compare(&mut self) -> SymResult<Expr> {
        let left = self.parse_expr()?;
        let op = match self.peek() {
            TokenKind::EqEq => CompareOp::Eq,
            TokenKind::NotEq => CompareOp::NotEq,
            TokenKind::Less => CompareOp::Less,
            TokenKind::LessEq => CompareOp::LessEq,
            TokenKind::Greater => CompareOp::Greater,
            TokenKind::GreaterEq => CompareOp::GreaterEq,
            other => {
                return Err(SymError::Syntax {
                    line: self.line(),
                    message: format!("expected a comparison operator, found {other:?}"),
                });
            }
        };
        self.advance();
        let right = self.parse_expr()?;
        Ok(Expr::Compare {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// `expr := term ( ('+'|'-') term )*`
    fn parse_expr(&mut self) -> SymResult<Expr> {
        let mut node = self.parse_term()?;
        loop {
            let op = match self.peek() {
                TokenKind::Plus => ArithOp::Add,
                TokenKind::Minus => ArithOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_term()?;
            node = Expr::BinOp {
                op,
                left: Box::new(node),
                right: Box::new(right),
            };
        }
        Ok(node)
    }

    /// `term := factor ( ('*'|'/') factor )*`
    fn parse_term(&mut self) -> SymResult<Expr> {
        let mut node = self.parse_factor()?;
        loop {
            let op = match self.peek() {
                TokenKind::Star => ArithOp::Mul,
                TokenKind::Slash => ArithOp::Div,
                _ => break,
            };
            self.advance();
            let right = self.parse_factor()?;
            node = Expr::BinOp {
                op,
                left: Box::new(node),
                right: Box::new(right),
            };
        }
        Ok(node)
    }

    /// `factor := INT | IDENT | '(' expr ')'`
    fn parse_factor(&mut self) -> SymResult<Expr> {
        match self.peek().clone() {
            TokenKind::Int(n) => {
                self.advance();
                Ok(Expr::IntLiteral(n))
            }
            TokenKind::Ident(name) => {
                self.advance();
                Ok(Expr::Name(name))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                Ok(inner)
            }
            other => Err(SymError::Syntax {
                line: self.line(),
                message: format!("expected a value, found {other:?}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_assignment() {
        let p = Parser::parse_source("x=0\n").unwrap();
        assert_eq!(
            p.body,
            vec![Stmt::Assign {
                target: "x".into(),
                value: Expr::IntLiteral(0),
            }]
        );
    }

    #[test]
    fn parses_if_with_conjunction() {
        let p = Parser::parse_source("if a < 5 and a > 0:\n    print\n").unwrap();
        assert_eq!(p.body.len(), 1);
        match &p.body[0] {
            Stmt::If { test, body } => {
                assert_eq!(test.atomic_comparisons().len(), 2);
                assert_eq!(body.len(), 1);
            }
            other => panic!("expected If, got {other:?}"),
        }
    }

    #[test]
    fn parses_nested_if_and_assert() {
        let src = "x=0\ny=0\nz=2*y\nif z==x:\n    if x>y+10:\n        assert False\n";
        let p = Parser::parse_source(src).unwrap();
        assert_eq!(p.body.len(), 4);
        match &p.body[3] {
            Stmt::If { body, .. } => match &body[0] {
                Stmt::If { body, .. } => assert_eq!(body[0].kind_name(), "Assert"),
                other => panic!("expected nested If, got {other:?}"),
            },
            other => panic!("expected If, got {other:?}"),
        }
    }

    #[test]
    fn rejects_if_body_with_no_indent() {
        let err = Parser::parse_source("if x > 0:\nprint\n");
        assert!(err.is_err());
    }

    #[test]
    fn assert_ignores_its_argument() {
        let p = Parser::parse_source("var1=2\nassert False\n").unwrap();
        assert!(matches!(p.body[1], Stmt::Assert { .. }));
    }
}
