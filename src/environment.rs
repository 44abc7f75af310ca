//! Symbolic Environment (§4.A). A per-path mapping from variable name to
//! symbolic integer term. Clone is a deep value copy — required for
//! environment clone isolation (§8 invariant 4).

use crate::errors::{SymError, SymResult};
use crate::term::IntTerm;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    bindings: BTreeMap<String, IntTerm>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, name: impl Into<String>, term: IntTerm) {
        self.bindings.insert(name.into(), term);
    }

    pub fn lookup(&self, name: &str) -> SymResult<&IntTerm> {
        self.bindings
            .get(name)
            .ok_or_else(|| SymError::UndefinedVariable(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }
}
