use crate::errors::SymResult;
use crate::explorer::{self, ExplorerConfig};
use crate::parser::Parser;
use crate::utils::config::Config;
use std::fs;

/// Parses and explores `path`, printing nothing. A fatal `SymError` (bad
/// syntax, unbound name, internal invariant) propagates to the caller,
/// which maps it to a nonzero exit (§7). `check` has no graph output, so
/// it never needs the synthetic terminal marker that `create_visual`
/// gates for `run` (§6).
pub fn handle(path: &str, config: &Config) -> SymResult<()> {
    let source = fs::read_to_string(path)?;
    let program = Parser::parse_source(&source)?;
    let explorer_config = ExplorerConfig {
        show_unmutated_constraints: config.engine.show_unmutated_constraints,
        only_show_feasible_paths: config.engine.only_show_feasible_paths,
        timeout_ms: config.solver.timeout_ms,
    };
    explorer::explore(&program, &explorer_config)?;
    Ok(())
}
