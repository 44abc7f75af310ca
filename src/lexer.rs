//! Byte-cursor lexer for the toy imperative language.
//!
//! Grounded on `dust-lang`'s `Lexer` (a cursor over the source bytes that
//! classifies runs of characters into token kinds) but simplified: this
//! grammar is indentation-sensitive rather than brace-delimited, so the
//! lexer additionally tracks an indent-column stack and synthesizes
//! `Indent`/`Dedent`/`Newline` tokens the way Python's tokenizer does.

use crate::errors::{SymError, SymResult};
use crate::token::{Token, TokenKind, keyword_kind};

pub struct Lexer<'src> {
    source: &'src [u8],
    index: usize,
    line: usize,
    indents: Vec<usize>,
    at_line_start: bool,
    paren_depth: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source: source.as_bytes(),
            index: 0,
            line: 1,
            indents: vec![0],
            at_line_start: true,
            paren_depth: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.source.get(self.index).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.source.get(self.index + offset).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.index += 1;
        Some(b)
    }

    /// Tokenizes the whole source in one pass.
    pub fn tokenize(mut self) -> SymResult<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            if self.at_line_start && self.paren_depth == 0 {
                match self.handle_line_start()? {
                    LineStart::Tokens(mut toks) => {
                        let done = toks.last().map(|t| t.kind == TokenKind::Eof).unwrap_or(false);
                        tokens.append(&mut toks);
                        if done {
                            break;
                        }
                        continue;
                    }
                    LineStart::BlankOrComment => continue,
                }
            }

            match self.next_token()? {
                Some(tok) => {
                    let is_newline = tok.kind == TokenKind::Newline;
                    tokens.push(tok);
                    if is_newline {
                        self.at_line_start = true;
                    }
                }
                None => {
                    tokens.push(Token::new(TokenKind::Newline, self.line));
                    while self.indents.len() > 1 {
                        self.indents.pop();
                        tokens.push(Token::new(TokenKind::Dedent, self.line));
                    }
                    tokens.push(Token::new(TokenKind::Eof, self.line));
                    break;
                }
            }
        }

        Ok(tokens)
    }

    fn handle_line_start(&mut self) -> SymResult<LineStart> {
        let mut col = 0usize;
        loop {
            match self.peek() {
                Some(b' ') => {
                    col += 1;
                    self.index += 1;
                }
                Some(b'\t') => {
                    col += 8;
                    self.index += 1;
                }
                _ => break,
            }
        }

        // Blank line or a comment-only line: skip without affecting indentation.
        if matches!(self.peek(), Some(b'\n') | None) || self.peek() == Some(b'#') {
            if self.peek() == Some(b'#') {
                while !matches!(self.peek(), Some(b'\n') | None) {
                    self.index += 1;
                }
            }
            if self.peek() == Some(b'\n') {
                self.index += 1;
                self.line += 1;
                return Ok(LineStart::BlankOrComment);
            }
            // EOF on a blank line: finish up via the main loop's EOF handling.
            self.at_line_start = false;
            return Ok(LineStart::Tokens(Vec::new()));
        }

        self.at_line_start = false;
        let current = *self.indents.last().unwrap();
        let mut out = Vec::new();
        if col > current {
            self.indents.push(col);
            out.push(Token::new(TokenKind::Indent, self.line));
        } else {
            while col < *self.indents.last().unwrap() {
                self.indents.pop();
                out.push(Token::new(TokenKind::Dedent, self.line));
            }
            if col != *self.indents.last().unwrap() {
                return Err(SymError::Syntax {
                    line: self.line,
                    message: "inconsistent indentation".into(),
                });
            }
        }
        Ok(LineStart::Tokens(out))
    }

    fn skip_inline_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ') | Some(b'\t')) {
            self.index += 1;
        }
    }

    fn next_token(&mut self) -> SymResult<Option<Token>> {
        self.skip_inline_whitespace();

        if self.peek() == Some(b'#') {
            while !matches!(self.peek(), Some(b'\n') | None) {
                self.index += 1;
            }
        }

        let line = self.line;
        let b = match self.peek() {
            Some(b) => b,
            None => return Ok(None),
        };

        if b == b'\n' {
            self.index += 1;
            self.line += 1;
            if self.paren_depth > 0 {
                return self.next_token();
            }
            return Ok(Some(Token::new(TokenKind::Newline, line)));
        }

        if b.is_ascii_digit() {
            return Ok(Some(self.lex_number(line)?));
        }

        if b.is_ascii_alphabetic() || b == b'_' {
            return Ok(Some(self.lex_ident_or_keyword(line)));
        }

        let kind = match b {
            b'=' if self.peek_at(1) == Some(b'=') => {
                self.index += 2;
                TokenKind::EqEq
            }
            b'=' => {
                self.index += 1;
                TokenKind::Equals
            }
            b'!' if self.peek_at(1) == Some(b'=') => {
                self.index += 2;
                TokenKind::NotEq
            }
            b'<' if self.peek_at(1) == Some(b'=') => {
                self.index += 2;
                TokenKind::LessEq
            }
            b'<' => {
                self.index += 1;
                TokenKind::Less
            }
            b'>' if self.peek_at(1) == Some(b'=') => {
                self.index += 2;
                TokenKind::GreaterEq
            }
            b'>' => {
                self.index += 1;
                TokenKind::Greater
            }
            b'+' => {
                self.index += 1;
                TokenKind::Plus
            }
            b'-' => {
                self.index += 1;
                TokenKind::Minus
            }
            b'*' => {
                self.index += 1;
                TokenKind::Star
            }
            b'/' => {
                self.index += 1;
                TokenKind::Slash
            }
            b'(' => {
                self.index += 1;
                self.paren_depth += 1;
                TokenKind::LParen
            }
            b')' => {
                self.index += 1;
                self.paren_depth = self.paren_depth.saturating_sub(1);
                TokenKind::RParen
            }
            b':' => {
                self.index += 1;
                TokenKind::Colon
            }
            other => {
                return Err(SymError::Syntax {
                    line,
                    message: format!("unexpected character '{}'", other as char),
                });
            }
        };

        Ok(Some(Token::new(kind, line)))
    }

    fn lex_number(&mut self, line: usize) -> SymResult<Token> {
        let start = self.index;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.index += 1;
        }
        let text = std::str::from_utf8(&self.source[start..self.index]).unwrap();
        let value = text.parse().map_err(|_| SymError::Syntax {
            line,
            message: format!("integer literal out of range: {text}"),
        })?;
        Ok(Token::new(TokenKind::Int(value), line))
    }

    fn lex_ident_or_keyword(&mut self, line: usize) -> Token {
        let start = self.index;
        while self
            .peek()
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_')
        {
            self.index += 1;
        }
        let text = std::str::from_utf8(&self.source[start..self.index]).unwrap();
        match keyword_kind(text) {
            Some(kind) => Token::new(kind, line),
            None => Token::new(TokenKind::Ident(text.to_string()), line),
        }
    }
}

enum LineStart {
    Tokens(Vec<Token>),
    BlankOrComment,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::new(src)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn lexes_simple_assignment() {
        let k = kinds("x=0\n");
        assert_eq!(
            k,
            vec![
                TokenKind::Ident("x".into()),
                TokenKind::Equals,
                TokenKind::Int(0),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lexes_if_with_indented_body() {
        let k = kinds("if x > 5:\n    print\n");
        assert_eq!(
            k,
            vec![
                TokenKind::KwIf,
                TokenKind::Ident("x".into()),
                TokenKind::Greater,
                TokenKind::Int(5),
                TokenKind::Colon,
                TokenKind::Newline,
                TokenKind::Indent,
                TokenKind::KwPrint,
                TokenKind::Newline,
                TokenKind::Dedent,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn rejects_inconsistent_indentation() {
        let err = Lexer::new("if x > 5:\n   print\n  print\n")
            .tokenize()
            .unwrap_err();
        assert!(matches!(err, SymError::Syntax { .. }));
    }

    #[test]
    fn oversized_int_literal_is_a_syntax_error_not_a_panic() {
        let err = Lexer::new("x=99999999999999999999\n").tokenize().unwrap_err();
        assert!(matches!(err, SymError::Syntax { .. }));
    }
}
