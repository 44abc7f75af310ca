//! Constraint Store (§4.B). Ordered, append-only list of boolean terms
//! representing the path condition. Ordering is preserved for rendering but
//! semantically immaterial — conjunction is commutative.

use crate::term::BoolTerm;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintStore {
    terms: Vec<BoolTerm>,
}

impl ConstraintStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, term: BoolTerm) {
        self.terms.push(term);
    }

    pub fn append_all(&mut self, terms: impl IntoIterator<Item = BoolTerm>) {
        self.terms.extend(terms);
    }

    pub fn snapshot(&self) -> &[BoolTerm] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Yields the conjunction of every term, or `None` for an empty store
    /// (no constraints recorded yet — trivially true).
    pub fn materialize(&self) -> Option<BoolTerm> {
        match self.terms.len() {
            0 => None,
            1 => Some(self.terms[0].clone()),
            _ => Some(BoolTerm::And(self.terms.clone())),
        }
    }
}
