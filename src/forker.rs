//! Branch Forker (§4.E). Splits one path state into an independent
//! true-branch child state and the false-branch continuation state — the
//! latter being the same state, mutated in place with the negated
//! constraint (§9 "Branch representation": no explicit else-subtree).

use crate::constraints::ConstraintStore;
use crate::environment::Environment;
use crate::evaluator::BranchDecomposition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryEdge {
    None,
    True,
    False,
}

impl EntryEdge {
    pub fn taillabel(self) -> Option<&'static str> {
        match self {
            EntryEdge::None => None,
            EntryEdge::True => Some("True"),
            EntryEdge::False => Some("False"),
        }
    }
}

/// One path's full state: its environment, its accumulated path condition,
/// and the edge kind it was entered on (§3 "Path state").
#[derive(Debug, Clone)]
pub struct PathState {
    pub env: Environment,
    pub constraints: ConstraintStore,
    pub entry_edge: EntryEdge,
}

impl PathState {
    pub fn root() -> Self {
        PathState {
            env: Environment::new(),
            constraints: ConstraintStore::new(),
            entry_edge: EntryEdge::None,
        }
    }
}

/// Forks `state` at an `If`: returns the independent true-branch state and
/// mutates `state` into the false-branch continuation.
pub fn fork(state: &mut PathState, decomposition: &BranchDecomposition) -> PathState {
    let mut true_state = state.clone();
    true_state.constraints.append_all(decomposition.true_terms.iter().cloned());
    true_state.entry_edge = EntryEdge::True;

    if let Some(false_term) = &decomposition.false_term {
        state.constraints.append(false_term.clone());
    }
    state.entry_edge = EntryEdge::False;

    true_state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::CompareOp;
    use crate::term::{BoolTerm, IntTerm};

    fn decomposition() -> BranchDecomposition {
        let c = BoolTerm::Compare(CompareOp::Less, IntTerm::Sym("x".into()), IntTerm::Lit(5));
        BranchDecomposition {
            true_terms: vec![c.clone()],
            false_term: Some(BoolTerm::Not(Box::new(c))),
        }
    }

    #[test]
    fn true_branch_is_independent_of_false_continuation() {
        let mut state = PathState::root();
        state.env.bind("x", IntTerm::Sym("x".into()));

        let decomp = decomposition();
        let mut true_state = fork(&mut state, &decomp);
        true_state.env.bind("x", IntTerm::Lit(0));

        assert_eq!(state.env.lookup("x").unwrap(), &IntTerm::Sym("x".into()));
        assert_eq!(true_state.constraints.snapshot().len(), 1);
        assert_eq!(state.constraints.snapshot().len(), 1);
        assert_eq!(true_state.entry_edge, EntryEdge::True);
        assert_eq!(state.entry_edge, EntryEdge::False);
    }

    #[test]
    fn empty_decomposition_adds_no_constraints() {
        let mut state = PathState::root();
        let decomp = BranchDecomposition { true_terms: vec![], false_term: None };
        let true_state = fork(&mut state, &decomp);
        assert!(true_state.constraints.is_empty());
        assert!(state.constraints.is_empty());
    }
}
