//! Symbolic terms (§3 "Symbolic term"). Pure data — no SMT dependency here;
//! translation to the solver's own AST happens only in [`crate::solver`]
//! (§4.F), so that constraint accumulation and environment bookkeeping stay
//! solver-agnostic.

use crate::ast::{ArithOp, CompareOp};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum IntTerm {
    Lit(i64),
    /// A free symbolic constant, named after the source variable that
    /// introduced it (§3, §4.D).
    Sym(String),
    BinOp(ArithOp, Box<IntTerm>, Box<IntTerm>),
}

impl IntTerm {
    pub fn collect_names(&self, out: &mut BTreeSet<String>) {
        match self {
            IntTerm::Lit(_) => {}
            IntTerm::Sym(name) => {
                out.insert(name.clone());
            }
            IntTerm::BinOp(_, l, r) => {
                l.collect_names(out);
                r.collect_names(out);
            }
        }
    }
}

impl fmt::Display for IntTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntTerm::Lit(n) => write!(f, "{n}"),
            IntTerm::Sym(name) => write!(f, "{name}"),
            IntTerm::BinOp(op, l, r) => {
                let sym = match op {
                    ArithOp::Add => "+",
                    ArithOp::Sub => "-",
                    ArithOp::Mul => "*",
                    ArithOp::Div => "/",
                };
                write!(f, "{l} {sym} {r}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoolTerm {
    Compare(CompareOp, IntTerm, IntTerm),
    And(Vec<BoolTerm>),
    Or(Vec<BoolTerm>),
    Not(Box<BoolTerm>),
}

impl BoolTerm {
    pub fn collect_names(&self, out: &mut BTreeSet<String>) {
        match self {
            BoolTerm::Compare(_, l, r) => {
                l.collect_names(out);
                r.collect_names(out);
            }
            BoolTerm::And(members) | BoolTerm::Or(members) => {
                for m in members {
                    m.collect_names(out);
                }
            }
            BoolTerm::Not(inner) => inner.collect_names(out),
        }
    }
}

impl fmt::Display for BoolTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoolTerm::Compare(op, l, r) => write!(f, "{l} {} {r}", op.as_source_str()),
            BoolTerm::And(members) => {
                let rendered: Vec<String> = members.iter().map(BoolTerm::to_string).collect();
                write!(f, "And({})", rendered.join(", "))
            }
            BoolTerm::Or(members) => {
                let rendered: Vec<String> = members.iter().map(BoolTerm::to_string).collect();
                write!(f, "Or({})", rendered.join(", "))
            }
            BoolTerm::Not(inner) => write!(f, "Not({inner})"),
        }
    }
}
