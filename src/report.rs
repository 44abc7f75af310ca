//! Test case reporting (AMBIENT.5 `--format text|json`). Renders the
//! ordered `TestCase` sequence produced by the explorer.

use crate::explorer::TestCase;
use serde_json::{json, Value};

pub fn render_text(test_cases: &[TestCase]) -> String {
    let mut out = String::new();
    for (i, case) in test_cases.iter().enumerate() {
        out.push_str(&format!("{:>3}. {}\n", i + 1, describe(case)));
    }
    out
}

pub fn render_json(test_cases: &[TestCase]) -> String {
    let values: Vec<Value> = test_cases
        .iter()
        .map(|case| match case {
            TestCase::Model(model) => json!({
                "kind": "sat",
                "assignment": model,
            }),
            TestCase::AnyInput => json!({ "kind": "sat", "assignment": {} }),
            TestCase::Infeasible => json!({ "kind": "unsat" }),
        })
        .collect();
    serde_json::to_string_pretty(&Value::Array(values)).expect("test case JSON is always well-formed")
}

fn describe(case: &TestCase) -> String {
    match case {
        TestCase::Model(model) => model
            .iter()
            .map(|(name, value)| format!("{name} = {value}"))
            .collect::<Vec<_>>()
            .join(", "),
        TestCase::AnyInput => "any input".to_string(),
        TestCase::Infeasible => "path unsatisfiable".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn text_numbers_each_case() {
        let cases = vec![TestCase::AnyInput, TestCase::Infeasible];
        let rendered = render_text(&cases);
        assert!(rendered.contains("1. any input"));
        assert!(rendered.contains("2. path unsatisfiable"));
    }

    #[test]
    fn json_renders_model_as_assignment_object() {
        let mut model = BTreeMap::new();
        model.insert("a".to_string(), 3i64);
        let cases = vec![TestCase::Model(model)];
        let rendered = render_json(&cases);
        assert!(rendered.contains("\"a\": 3"));
        assert!(rendered.contains("\"kind\": \"sat\""));
    }
}
