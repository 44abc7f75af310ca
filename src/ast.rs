//! The typed abstract syntax tree produced by [`crate::parser::Parser`].
//!
//! Statement and expression kinds match §6 of the specification exactly:
//! `{Assign, If, Print, Assert}` and `{IntLiteral, Name, BinOp, Compare,
//! BoolAnd}`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
}

impl CompareOp {
    pub fn as_source_str(self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::NotEq => "!=",
            CompareOp::Less => "<",
            CompareOp::LessEq => "<=",
            CompareOp::Greater => ">",
            CompareOp::GreaterEq => ">=",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    IntLiteral(i64),
    Name(String),
    BinOp {
        op: ArithOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Compare {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// A conjunction of one or more `Compare` nodes, e.g. `a < 5 and a > 0`.
    BoolAnd(Vec<Expr>),
}

impl Expr {
    /// Flattens a (possibly trivial) boolean test into its atomic
    /// comparisons, per §4.D: a single comparison decomposes to one term,
    /// a `BoolAnd` decomposes to its members in source order.
    pub fn atomic_comparisons(&self) -> Vec<&Expr> {
        match self {
            Expr::BoolAnd(members) => members.iter().collect(),
            other => vec![other],
        }
    }

    /// Renders the expression the way the original source would read,
    /// used for node labels (§4.D, §4.H).
    pub fn render(&self) -> String {
        match self {
            Expr::IntLiteral(n) => n.to_string(),
            Expr::Name(name) => name.clone(),
            Expr::BinOp { op, left, right } => {
                let sym = match op {
                    ArithOp::Add => "+",
                    ArithOp::Sub => "-",
                    ArithOp::Mul => "*",
                    ArithOp::Div => "/",
                };
                format!("{} {} {}", left.render(), sym, right.render())
            }
            Expr::Compare { op, left, right } => {
                format!("{} {} {}", left.render(), op.as_source_str(), right.render())
            }
            Expr::BoolAnd(members) => members
                .iter()
                .map(Expr::render)
                .collect::<Vec<_>>()
                .join(" and "),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Assign { target: String, value: Expr },
    If { test: Expr, body: Vec<Stmt> },
    Print,
    Assert { value: Expr },
}

impl Stmt {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Stmt::Assign { .. } => "Assign",
            Stmt::If { .. } => "If",
            Stmt::Print => "Print",
            Stmt::Assert { .. } => "Assert",
        }
    }

    /// Source-like rendering used for non-Assign/If node labels.
    pub fn render(&self) -> String {
        match self {
            Stmt::Assign { target, value } => format!("{target} = {}", value.render()),
            Stmt::If { test, .. } => format!("if {}:", test.render()),
            Stmt::Print => "print".to_string(),
            Stmt::Assert { value } => format!("assert {}", value.render()),
        }
    }
}

/// A parsed program: the root body, already including the synthetic
/// trailing `Print` terminal when one was requested (§6).
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Vec<Stmt>,
}

impl Program {
    /// Appends the synthetic end-of-program marker statement, matching the
    /// original's `append_end_statement_to_source_code`.
    pub fn with_terminal_marker(mut self) -> Self {
        self.body.push(Stmt::Print);
        self
    }
}
