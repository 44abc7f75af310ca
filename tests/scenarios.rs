//! Black-box scenarios run through the public API the way `commands::run`
//! drives it: parse a whole source string, append the terminal marker,
//! explore, and check the resulting test case sequence.

use symx::explorer::{self, ExplorerConfig, TestCase};
use symx::parser::Parser;

fn explore(source: &str) -> Vec<TestCase> {
    let program = Parser::parse_source(source).unwrap().with_terminal_marker();
    explorer::explore(&program, &ExplorerConfig::default())
        .unwrap()
        .test_cases
}

fn model(case: &TestCase) -> &std::collections::BTreeMap<String, i64> {
    match case {
        TestCase::Model(m) => m,
        other => panic!("expected a model, got {other:?}"),
    }
}

/// A nested `if` with an `assert` buried in the innermost branch. Every
/// variable here is introduced by a first assignment of an integer literal,
/// which binds it to a fresh symbolic constant rather than fixing its value
/// (§4.D) — so none of the three reachable terminals are actually
/// infeasible, even though the assert's own branch looks the most
/// constrained. See DESIGN.md's "S1 scenario" entry for why this diverges
/// from the walkthrough's specific sat/unsat claims.
#[test]
fn nested_if_with_assert_reaches_three_satisfiable_terminals() {
    let source = "x=0\ny=0\nz=2*y\nif z==x:\n    if x>y+10:\n        assert False\n";
    let cases = explore(source);

    assert_eq!(cases.len(), 3);
    for case in &cases {
        let m = model(case);
        assert_eq!(m.keys().cloned().collect::<Vec<_>>(), vec!["x", "y"]);
    }

    // Innermost branch, reached via the assert's jump: z == x AND x > y+10.
    let deepest = model(&cases[0]);
    let (x, y) = (deepest["x"], deepest["y"]);
    assert_eq!(2 * y, x);
    assert!(x > y + 10);

    // Inner if's false continuation, inside the outer if's true branch.
    let inner_false = model(&cases[1]);
    let (x, y) = (inner_false["x"], inner_false["y"]);
    assert_eq!(2 * y, x);
    assert!(x <= y + 10);

    // Outer if's false branch.
    let outer_false = model(&cases[2]);
    let (x, y) = (outer_false["x"], outer_false["y"]);
    assert_ne!(2 * y, x);
}

/// A single `if` over a freshly introduced symbolic input: both branches are
/// satisfiable since nothing pins the variable to a concrete value.
#[test]
fn single_if_over_a_fresh_symbolic_input_has_two_satisfiable_branches() {
    let source = "n=0\nif n<10:\n    print\n";
    let cases = explore(source);

    assert_eq!(cases.len(), 2);

    let true_branch = model(&cases[0]);
    assert!(true_branch["n"] < 10);

    let false_branch = model(&cases[1]);
    assert!(false_branch["n"] >= 10);
}

/// A conjunction condition (`and`) decomposes into two atomic comparisons;
/// the true branch asserts both, the false branch asserts their negated
/// disjunction, and the solver returns a real witness for each.
#[test]
fn conjunction_condition_produces_witnesses_for_both_branches() {
    let source = "a=0\nif a<5 and a>0:\n    print\n";
    let cases = explore(source);

    assert_eq!(cases.len(), 2);

    let true_branch = model(&cases[0]);
    let a = true_branch["a"];
    assert!(a > 0 && a < 5);

    let false_branch = model(&cases[1]);
    let a = false_branch["a"];
    assert!(a <= 0 || a >= 5);
}
