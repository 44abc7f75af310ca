//! AST Cursor (§4.C). Addresses a position in the program as a sequence of
//! body/index steps; the root cursor is `[0]`. A `BranchBody` step marks
//! descent into a conditional's then-body, mirroring the original's `'b'`
//! path token.

use crate::ast::{Program, Stmt};
use crate::errors::{SymError, SymResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorStep {
    Index(usize),
    BranchBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor(Vec<CursorStep>);

impl Cursor {
    pub fn root() -> Self {
        Cursor(vec![CursorStep::Index(0)])
    }

    /// A cursor addressing a top-level statement directly, used for the
    /// `Assert` jump-to-terminal splice (§4.G step 6).
    pub fn at_root_index(index: usize) -> Self {
        Cursor(vec![CursorStep::Index(index)])
    }

    fn invariant(message: impl Into<String>) -> SymError {
        SymError::InternalInvariant(message.into())
    }

    /// Returns the body the cursor's final index lives in, together with
    /// that index.
    fn locate<'a>(&self, program: &'a Program) -> SymResult<(&'a Vec<Stmt>, usize)> {
        let mut body: &Vec<Stmt> = &program.body;
        let mut steps = self.0.iter().peekable();

        loop {
            let idx = match steps.next() {
                Some(CursorStep::Index(n)) => *n,
                Some(CursorStep::BranchBody) => {
                    return Err(Self::invariant("cursor cannot start mid-step on branch-body"));
                }
                None => return Err(Self::invariant("empty cursor")),
            };

            match steps.peek() {
                None => return Ok((body, idx)),
                Some(CursorStep::BranchBody) => {
                    steps.next();
                    let stmt = body
                        .get(idx)
                        .ok_or_else(|| Self::invariant("cursor index out of range"))?;
                    match stmt {
                        Stmt::If { body: inner, .. } => body = inner,
                        _ => return Err(Self::invariant("branch-body descent into non-If statement")),
                    }
                }
                Some(CursorStep::Index(_)) => {
                    return Err(Self::invariant(
                        "malformed cursor: two indices without an intervening branch-body",
                    ));
                }
            }
        }
    }

    pub fn resolve<'a>(&self, program: &'a Program) -> SymResult<&'a Stmt> {
        let (body, idx) = self.locate(program)?;
        body.get(idx)
            .ok_or_else(|| Self::invariant("cursor index out of range"))
    }

    pub fn has_sibling_below(&self, program: &Program) -> SymResult<bool> {
        let (body, idx) = self.locate(program)?;
        Ok(body.len() > idx + 1)
    }

    pub fn has_sibling_below_in_any_ancestor(&self, program: &Program) -> SymResult<bool> {
        let mut path = self.0.clone();
        while path.len() > 2 {
            let ancestor = Cursor(path[..path.len() - 2].to_vec());
            if ancestor.has_sibling_below(program)? {
                return Ok(true);
            }
            path.truncate(path.len() - 2);
        }
        Ok(false)
    }

    pub fn descend_into_then_branch(&self) -> Cursor {
        let mut steps = self.0.clone();
        steps.push(CursorStep::BranchBody);
        steps.push(CursorStep::Index(0));
        Cursor(steps)
    }

    pub fn next_in_same_body(&self) -> SymResult<Cursor> {
        let mut steps = self.0.clone();
        match steps.last_mut() {
            Some(CursorStep::Index(n)) => {
                *n += 1;
                Ok(Cursor(steps))
            }
            _ => Err(Self::invariant("cursor does not end in an index")),
        }
    }

    pub fn next_in_ancestor_body(&self, program: &Program) -> SymResult<Cursor> {
        let mut path = self.0.clone();
        loop {
            if path.len() <= 2 {
                return Err(Self::invariant("no ancestor body to continue in"));
            }
            path.truncate(path.len() - 2);
            let candidate = Cursor(path.clone());
            if candidate.has_sibling_below(program)? {
                match path.last_mut() {
                    Some(CursorStep::Index(n)) => {
                        *n += 1;
                        return Ok(Cursor(path));
                    }
                    _ => return Err(Self::invariant("ancestor cursor does not end in an index")),
                }
            }
        }
    }

    /// True iff this cursor is terminal: no sibling below in its own body,
    /// nor in any enclosing body (§4.G step 4, glossary "Terminal
    /// statement").
    pub fn is_terminal(&self, program: &Program) -> SymResult<bool> {
        Ok(!self.has_sibling_below(program)? && !self.has_sibling_below_in_any_ancestor(program)?)
    }
}
