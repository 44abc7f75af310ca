//! Statement Evaluator (§4.D). Turns one AST statement, evaluated against
//! the current path's environment, into a rendered label and — for `If` —
//! the branch decomposition consumed by the Branch Forker (§4.E).

use crate::ast::{Expr, Stmt};
use crate::environment::Environment;
use crate::errors::{SymError, SymResult};
use crate::term::{BoolTerm, IntTerm};

/// The constraints a conditional contributes to each of its two branches.
#[derive(Debug, Clone)]
pub struct BranchDecomposition {
    pub true_terms: Vec<BoolTerm>,
    pub false_term: Option<BoolTerm>,
}

/// The outcome of evaluating one statement: a label, and (for `If`) the
/// branch decomposition the Forker needs.
#[derive(Debug, Clone)]
pub struct Evaluated {
    pub label: String,
    pub branch: Option<BranchDecomposition>,
}

pub fn evaluate(stmt: &Stmt, env: &mut Environment, show_unmutated: bool) -> SymResult<Evaluated> {
    match stmt {
        Stmt::Assign { target, value } => evaluate_assign(target, value, env),
        Stmt::If { test, .. } => evaluate_if(test, env, show_unmutated),
        Stmt::Print => Ok(Evaluated {
            label: stmt.render(),
            branch: None,
        }),
        Stmt::Assert { .. } => Ok(Evaluated {
            label: "Error !".to_string(),
            branch: None,
        }),
    }
}

/// Assignment typing (§4.D, §9 "Assignment typing"): a literal RHS on a
/// name's first occurrence declares a symbolic input (label `x = symbolic`);
/// a literal RHS rebinding an already-bound name concretizes it; any other
/// RHS is evaluated under the environment and substituted in.
fn evaluate_assign(target: &str, value: &Expr, env: &mut Environment) -> SymResult<Evaluated> {
    let label = match value {
        Expr::IntLiteral(n) => {
            if env.contains(target) {
                env.bind(target, IntTerm::Lit(*n));
                format!("{target} = {n}")
            } else {
                env.bind(target, IntTerm::Sym(target.to_string()));
                format!("{target} = symbolic")
            }
        }
        other => {
            if !env.contains(target) {
                env.bind(target, IntTerm::Sym(target.to_string()));
            }
            let term = to_int_term(other, env)?;
            env.bind(target, term);
            format!("{target} = {}", other.render())
        }
    };
    Ok(Evaluated { label, branch: None })
}

fn evaluate_if(test: &Expr, env: &Environment, show_unmutated: bool) -> SymResult<Evaluated> {
    let atoms = test.atomic_comparisons();
    let mut true_terms = Vec::with_capacity(atoms.len());
    for atom in &atoms {
        true_terms.push(to_bool_term(atom, env)?);
    }

    // De Morgan applied to the conjunction (§4.D); for n=0 neither branch
    // gains a constraint.
    let false_term = match true_terms.len() {
        0 => None,
        1 => Some(BoolTerm::Not(Box::new(true_terms[0].clone()))),
        _ => Some(BoolTerm::Or(
            true_terms
                .iter()
                .cloned()
                .map(|t| BoolTerm::Not(Box::new(t)))
                .collect(),
        )),
    };

    let label = if show_unmutated {
        format!("if {}:", test.render())
    } else {
        let rendered: Vec<String> = true_terms.iter().map(BoolTerm::to_string).collect();
        format!("if {}:", rendered.join(" and "))
    };

    Ok(Evaluated {
        label,
        branch: Some(BranchDecomposition { true_terms, false_term }),
    })
}

/// Translates an expression AST into a symbolic integer term, substituting
/// bound names from `env` (§4.A).
pub fn to_int_term(expr: &Expr, env: &Environment) -> SymResult<IntTerm> {
    match expr {
        Expr::IntLiteral(n) => Ok(IntTerm::Lit(*n)),
        Expr::Name(name) => env.lookup(name).map(|t| t.clone()),
        Expr::BinOp { op, left, right } => Ok(IntTerm::BinOp(
            *op,
            Box::new(to_int_term(left, env)?),
            Box::new(to_int_term(right, env)?),
        )),
        Expr::Compare { .. } | Expr::BoolAnd(_) => Err(SymError::InternalInvariant(
            "a comparison or conjunction cannot appear in integer position".into(),
        )),
    }
}

/// Translates a single atomic comparison (as produced by
/// [`Expr::atomic_comparisons`]) into a boolean term.
pub fn to_bool_term(expr: &Expr, env: &Environment) -> SymResult<BoolTerm> {
    match expr {
        Expr::Compare { op, left, right } => {
            Ok(BoolTerm::Compare(*op, to_int_term(left, env)?, to_int_term(right, env)?))
        }
        other => Err(SymError::InternalInvariant(format!(
            "expected an atomic comparison in a boolean test, found {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::CompareOp;

    #[test]
    fn literal_on_unbound_name_is_symbolic() {
        let mut env = Environment::new();
        let evaluated = evaluate_assign("x", &Expr::IntLiteral(0), &mut env).unwrap();
        assert_eq!(evaluated.label, "x = symbolic");
        assert_eq!(env.lookup("x").unwrap(), &IntTerm::Sym("x".into()));
    }

    #[test]
    fn literal_on_bound_name_concretizes() {
        let mut env = Environment::new();
        env.bind("x", IntTerm::Sym("x".into()));
        let evaluated = evaluate_assign("x", &Expr::IntLiteral(7), &mut env).unwrap();
        assert_eq!(evaluated.label, "x = 7");
        assert_eq!(env.lookup("x").unwrap(), &IntTerm::Lit(7));
    }

    #[test]
    fn non_literal_rhs_substitutes_bound_names() {
        let mut env = Environment::new();
        env.bind("y", IntTerm::Lit(3));
        let expr = Expr::BinOp {
            op: crate::ast::ArithOp::Mul,
            left: Box::new(Expr::IntLiteral(2)),
            right: Box::new(Expr::Name("y".into())),
        };
        let evaluated = evaluate_assign("z", &expr, &mut env).unwrap();
        assert_eq!(evaluated.label, "z = 2 * y");
        assert_eq!(
            env.lookup("z").unwrap(),
            &IntTerm::BinOp(crate::ast::ArithOp::Mul, Box::new(IntTerm::Lit(2)), Box::new(IntTerm::Lit(3)))
        );
    }

    #[test]
    fn conjunction_decomposes_with_de_morgan_false_branch() {
        let mut env = Environment::new();
        env.bind("a", IntTerm::Sym("a".into()));
        let test = Expr::BoolAnd(vec![
            Expr::Compare {
                op: CompareOp::Less,
                left: Box::new(Expr::Name("a".into())),
                right: Box::new(Expr::IntLiteral(5)),
            },
            Expr::Compare {
                op: CompareOp::Greater,
                left: Box::new(Expr::Name("a".into())),
                right: Box::new(Expr::IntLiteral(0)),
            },
        ]);
        let evaluated = evaluate_if(&test, &env, false).unwrap();
        let branch = evaluated.branch.unwrap();
        assert_eq!(branch.true_terms.len(), 2);
        match branch.false_term.unwrap() {
            BoolTerm::Or(members) => assert_eq!(members.len(), 2),
            other => panic!("expected Or(..), got {other:?}"),
        }
    }
}
