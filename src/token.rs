//! Token kinds produced by the [`crate::lexer::Lexer`].

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Ident(String),
    Int(i64),

    Equals,     // =
    Plus,       // +
    Minus,      // -
    Star,       // *
    Slash,      // /
    EqEq,       // ==
    NotEq,      // !=
    Less,       // <
    LessEq,     // <=
    Greater,    // >
    GreaterEq,  // >=
    LParen,     // (
    RParen,     // )
    Colon,      // :

    KwIf,
    KwAnd,
    KwPrint,
    KwAssert,
    KwFalse,
    KwTrue,

    Newline,
    Indent,
    Dedent,
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, line: usize) -> Self {
        Self { kind, line }
    }
}

pub fn keyword_kind(word: &str) -> Option<TokenKind> {
    match word {
        "if" => Some(TokenKind::KwIf),
        "and" => Some(TokenKind::KwAnd),
        "print" => Some(TokenKind::KwPrint),
        "assert" => Some(TokenKind::KwAssert),
        "False" => Some(TokenKind::KwFalse),
        "True" => Some(TokenKind::KwTrue),
        _ => None,
    }
}
