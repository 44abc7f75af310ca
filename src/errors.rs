use thiserror::Error;

pub type SymResult<T, E = SymError> = Result<T, E>;

#[derive(Debug, Error)]
pub enum SymError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("undefined variable `{0}`")]
    UndefinedVariable(String),

    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),

    #[error("{0}")]
    Msg(String),
}

impl From<&str> for SymError {
    fn from(s: &str) -> Self {
        SymError::Msg(s.to_owned())
    }
}

impl From<String> for SymError {
    fn from(s: String) -> Self {
        SymError::Msg(s)
    }
}

#[test]
fn io_conversion_retains_message() {
    let e = std::io::Error::new(std::io::ErrorKind::Other, "boom!");
    let n: SymError = e.into();
    assert!(matches!(n, SymError::Io(_)));
    assert!(n.to_string().contains("boom"));
}

#[test]
fn syntax_error_formats_with_line() {
    let e = SymError::Syntax {
        line: 3,
        message: "unexpected token".into(),
    };
    assert_eq!(e.to_string(), "syntax error at line 3: unexpected token");
}

#[test]
fn simple_string_into_msg() {
    let e: SymError = "plain msg".into();
    assert!(matches!(e, SymError::Msg(s) if s == "plain msg"));
}
