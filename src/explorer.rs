//! Path Explorer (§4.G). The recursion that drives the Cursor, Evaluator,
//! Forker, and Solver Adapter to produce the exploration node tree and the
//! ordered list of test cases.

use crate::ast::{Program, Stmt};
use crate::cursor::Cursor;
use crate::errors::{SymError, SymResult};
use crate::evaluator::evaluate;
use crate::forker::{fork, EntryEdge, PathState};
use crate::solver::{self, Verdict};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub enum TestCase {
    /// A concrete witness: variable name to satisfying integer.
    Model(BTreeMap<String, i64>),
    /// Sat with no free variable mentioned — reachable under any input.
    AnyInput,
    /// Unsat — the sentinel recorded unless feasible-only output is requested.
    Infeasible,
}

#[derive(Debug, Clone)]
pub struct ExplorationNode {
    pub id: usize,
    pub kind: &'static str,
    pub label: String,
    pub entry_edge: EntryEdge,
    pub is_terminal: bool,
    pub children: Vec<ExplorationNode>,
}

pub struct ExplorationResult {
    pub root: ExplorationNode,
    pub test_cases: Vec<TestCase>,
}

#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    pub show_unmutated_constraints: bool,
    pub only_show_feasible_paths: bool,
    pub timeout_ms: u32,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        ExplorerConfig {
            show_unmutated_constraints: true,
            only_show_feasible_paths: false,
            timeout_ms: 2000,
        }
    }
}

pub fn explore(program: &Program, config: &ExplorerConfig) -> SymResult<ExplorationResult> {
    let mut explorer = Explorer {
        program,
        config,
        next_id: 0,
        test_cases: Vec::new(),
    };
    let root = explorer
        .visit(Cursor::root(), PathState::root())?
        .ok_or_else(|| SymError::InternalInvariant("the root path cannot be pruned".into()))?;
    Ok(ExplorationResult {
        root,
        test_cases: explorer.test_cases,
    })
}

struct Explorer<'a> {
    program: &'a Program,
    config: &'a ExplorerConfig,
    next_id: usize,
    test_cases: Vec<TestCase>,
}

impl<'a> Explorer<'a> {
    fn allocate_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn visit(&mut self, cursor: Cursor, mut state: PathState) -> SymResult<Option<ExplorationNode>> {
        let id = self.allocate_id();
        let entry_edge = state.entry_edge;
        let stmt = cursor.resolve(self.program)?.clone();
        let is_terminal = cursor.is_terminal(self.program)?;

        let evaluated = evaluate(&stmt, &mut state.env, self.config.show_unmutated_constraints)?;
        let mut label = evaluated.label;

        let mut suppressed = false;
        if is_terminal {
            let condition = state.constraints.materialize();
            let verdict = solver::check(condition.as_ref(), self.config.timeout_ms);
            label = format!("{label}\n[{}]", verdict.describe());

            suppressed = self.config.only_show_feasible_paths && matches!(verdict, Verdict::Unsat);
            if !suppressed {
                self.test_cases.push(match &verdict {
                    Verdict::Sat { model } if model.is_empty() => TestCase::AnyInput,
                    Verdict::Sat { model } => TestCase::Model(model.clone()),
                    Verdict::Unsat => TestCase::Infeasible,
                });
            }
        }

        if suppressed {
            return Ok(None);
        }

        let mut children = Vec::new();
        match &stmt {
            Stmt::If { .. } => {
                let decomposition = evaluated
                    .branch
                    .expect("an If statement always produces a branch decomposition");
                let true_state = fork(&mut state, &decomposition);
                if let Some(child) = self.visit(cursor.descend_into_then_branch(), true_state)? {
                    children.push(child);
                }
                self.continue_after(&cursor, state, &mut children)?;
            }
            Stmt::Assert { .. } => {
                let last_index = self.program.body.len() - 1;
                let jump = Cursor::at_root_index(last_index);
                if let Some(child) = self.visit(jump, state)? {
                    children.push(child);
                }
            }
            Stmt::Assign { .. } | Stmt::Print => {
                self.continue_after(&cursor, state, &mut children)?;
            }
        }

        // A non-terminal node whose every continuation got pruned by the
        // feasible-only filter carries no reachable terminal of its own;
        // dropping it too makes "suppress UNSAT nodes and their subtrees"
        // (§6) hold even when the UNSAT verdict is only known several
        // statements further down the path, not at this node itself.
        if !is_terminal && children.is_empty() {
            return Ok(None);
        }

        Ok(Some(ExplorationNode {
            id,
            kind: stmt.kind_name(),
            label,
            entry_edge,
            is_terminal,
            children,
        }))
    }

    /// Step 6's "else" branch: continue at the next same-body sibling, or
    /// failing that the next ancestor-body sibling. At most one of the two
    /// is ever applicable for a given cursor.
    fn continue_after(&mut self, cursor: &Cursor, state: PathState, children: &mut Vec<ExplorationNode>) -> SymResult<()> {
        if cursor.has_sibling_below(self.program)? {
            let next = cursor.next_in_same_body()?;
            if let Some(child) = self.visit(next, state)? {
                children.push(child);
            }
        } else if cursor.has_sibling_below_in_any_ancestor(self.program)? {
            let next = cursor.next_in_ancestor_body(self.program)?;
            if let Some(child) = self.visit(next, state)? {
                children.push(child);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn explore_source(src: &str, config: ExplorerConfig) -> ExplorationResult {
        let program = Parser::parse_source(src).unwrap().with_terminal_marker();
        explore(&program, &config).unwrap()
    }

    #[test]
    fn straight_line_program_has_a_single_terminal_test_case() {
        let result = explore_source("x=0\n", ExplorerConfig::default());
        assert_eq!(result.test_cases, vec![TestCase::AnyInput]);
        assert_eq!(result.root.kind, "Assign");
        assert_eq!(result.root.children.len(), 1);
        assert!(result.root.children[0].is_terminal);
    }

    #[test]
    fn assert_jumps_directly_to_the_synthetic_terminal() {
        let result = explore_source("var1=2\nassert False\nif var1 == 30:\n    print\n", ExplorerConfig::default());
        // The assert path produces exactly one child (the jump target) and
        // never descends into the `if` that follows it in source order.
        let assert_node = &result.root.children[0];
        assert_eq!(assert_node.kind, "Assert");
        assert_eq!(assert_node.children.len(), 1);
        assert!(assert_node.children[0].is_terminal);
        assert_eq!(assert_node.children[0].kind, "Print");
    }

    #[test]
    fn if_produces_two_complementary_terminal_branches() {
        let result = explore_source("x=0\nif x>0:\n    print\n", ExplorerConfig::default());
        // x=0 -> if -> { true: then-body print, continuing to the shared
        // synthetic terminal; false: straight to the same terminal }.
        let if_node = &result.root.children[0];
        assert_eq!(if_node.kind, "If");
        assert_eq!(if_node.children.len(), 2);

        let true_branch = &if_node.children[0];
        assert_eq!(true_branch.kind, "Print");
        assert!(!true_branch.is_terminal);
        assert_eq!(true_branch.children.len(), 1);
        assert!(true_branch.children[0].is_terminal);

        let false_branch = &if_node.children[1];
        assert!(false_branch.is_terminal);

        assert_eq!(result.test_cases.len(), 2);
    }

    #[test]
    fn feasible_only_suppresses_the_unsat_branch() {
        // x is bound concretely via rebind-to-literal after first being
        // declared, so `x>0` on the concrete value 0 is unsatisfiable.
        let src = "x=0\nx=0\nif x>0:\n    print\n";
        let config = ExplorerConfig {
            only_show_feasible_paths: true,
            ..ExplorerConfig::default()
        };
        let result = explore_source(src, config);
        let if_node = &result.root.children[0].children[0];
        assert_eq!(if_node.kind, "If");
        assert_eq!(if_node.children.len(), 1, "the infeasible true branch must be pruned");
        assert!(result.test_cases.iter().all(|tc| *tc != TestCase::Infeasible));
    }
}
