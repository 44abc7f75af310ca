//! Solver Adapter (§4.F). Translates the accumulated path condition into
//! z3 terms and checks satisfiability. A fresh `Context`/`Solver` pair is
//! created per call so constraints never leak across paths (§5).

use crate::ast::{ArithOp, CompareOp};
use crate::term::{BoolTerm, IntTerm};
use std::collections::{BTreeMap, BTreeSet};
use z3::ast::{Ast, Bool, Int};
use z3::{Config, Context, SatResult, Solver};

#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Satisfiable; `model` maps each free variable mentioned in the path
    /// condition to a witness integer. Empty when the condition mentions no
    /// free variable at all — the "any input" case of §4.F.
    Sat { model: BTreeMap<String, i64> },
    Unsat,
}

impl Verdict {
    pub fn is_sat(&self) -> bool {
        matches!(self, Verdict::Sat { .. })
    }

    /// The solver-verdict text appended to a terminal node's label (§4.F).
    pub fn describe(&self) -> String {
        match self {
            Verdict::Sat { model } if model.is_empty() => "any input".to_string(),
            Verdict::Sat { model } => model
                .iter()
                .map(|(name, value)| format!("{name} = {value}"))
                .collect::<Vec<_>>()
                .join(", "),
            Verdict::Unsat => "path unsatisfiable".to_string(),
        }
    }
}

/// Checks a path condition. `None` stands for an empty constraint store
/// (trivially true, §4.B).
pub fn check(condition: Option<&BoolTerm>, timeout_ms: u32) -> Verdict {
    let Some(condition) = condition else {
        return Verdict::Sat { model: BTreeMap::new() };
    };

    let mut cfg = Config::new();
    cfg.set_timeout_msec(u64::from(timeout_ms));
    let ctx = Context::new(&cfg);
    let solver = Solver::new(&ctx);

    let mut names = BTreeSet::new();
    condition.collect_names(&mut names);
    let vars: BTreeMap<String, Int> = names
        .iter()
        .map(|name| (name.clone(), Int::new_const(&ctx, name.as_str())))
        .collect();

    solver.assert(&lower_bool(&ctx, condition, &vars));

    match solver.check() {
        SatResult::Sat => {
            let model = solver.get_model().expect("Sat implies a model exists");
            let mut witness = BTreeMap::new();
            for (name, var) in &vars {
                if let Some(value) = model.eval(var, true).and_then(|v| v.as_i64()) {
                    witness.insert(name.clone(), value);
                }
            }
            Verdict::Sat { model: witness }
        }
        SatResult::Unsat | SatResult::Unknown => Verdict::Unsat,
    }
}

fn lower_int<'ctx>(ctx: &'ctx Context, term: &IntTerm, vars: &BTreeMap<String, Int<'ctx>>) -> Int<'ctx> {
    match term {
        IntTerm::Lit(n) => Int::from_i64(ctx, *n),
        IntTerm::Sym(name) => vars
            .get(name)
            .expect("every free name was pre-declared from collect_names")
            .clone(),
        IntTerm::BinOp(op, left, right) => {
            let l = lower_int(ctx, left, vars);
            let r = lower_int(ctx, right, vars);
            match op {
                ArithOp::Add => Int::add(ctx, &[&l, &r]),
                ArithOp::Sub => Int::sub(ctx, &[&l, &r]),
                ArithOp::Mul => Int::mul(ctx, &[&l, &r]),
                ArithOp::Div => l.div(&r),
            }
        }
    }
}

fn lower_bool<'ctx>(ctx: &'ctx Context, term: &BoolTerm, vars: &BTreeMap<String, Int<'ctx>>) -> Bool<'ctx> {
    match term {
        BoolTerm::Compare(op, l, r) => {
            let l = lower_int(ctx, l, vars);
            let r = lower_int(ctx, r, vars);
            match op {
                CompareOp::Eq => l._eq(&r),
                CompareOp::NotEq => l._eq(&r).not(),
                CompareOp::Less => l.lt(&r),
                CompareOp::LessEq => l.le(&r),
                CompareOp::Greater => l.gt(&r),
                CompareOp::GreaterEq => l.ge(&r),
            }
        }
        BoolTerm::And(members) => {
            let lowered: Vec<Bool> = members.iter().map(|m| lower_bool(ctx, m, vars)).collect();
            let refs: Vec<&Bool> = lowered.iter().collect();
            Bool::and(ctx, &refs)
        }
        BoolTerm::Or(members) => {
            let lowered: Vec<Bool> = members.iter().map(|m| lower_bool(ctx, m, vars)).collect();
            let refs: Vec<&Bool> = lowered.iter().collect();
            Bool::or(ctx, &refs)
        }
        BoolTerm::Not(inner) => lower_bool(ctx, inner, vars).not(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_condition_is_any_input() {
        assert_eq!(check(None, 2000).describe(), "any input");
    }

    #[test]
    fn contradictory_concrete_comparison_is_unsat() {
        let term = BoolTerm::Compare(CompareOp::Greater, IntTerm::Lit(0), IntTerm::Lit(10));
        assert_eq!(check(Some(&term), 2000), Verdict::Unsat);
    }

    #[test]
    fn satisfiable_symbolic_comparison_yields_witness() {
        let term = BoolTerm::Compare(CompareOp::Less, IntTerm::Sym("a".into()), IntTerm::Lit(5));
        let verdict = check(Some(&term), 2000);
        match verdict {
            Verdict::Sat { model } => {
                let a = *model.get("a").expect("a is the only free variable");
                assert!(a < 5);
            }
            Verdict::Unsat => panic!("expected sat"),
        }
    }

    #[test]
    fn conjunction_of_tautological_concrete_terms_is_any_input() {
        let term = BoolTerm::And(vec![
            BoolTerm::Compare(CompareOp::Eq, IntTerm::Lit(0), IntTerm::Lit(0)),
            BoolTerm::Compare(CompareOp::LessEq, IntTerm::Lit(0), IntTerm::Lit(10)),
        ]);
        assert_eq!(check(Some(&term), 2000).describe(), "any input");
    }
}
