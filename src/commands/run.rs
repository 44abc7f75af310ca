use crate::cli::OutputFormat;
use crate::digraph::{self, RenderOptions};
use crate::errors::SymResult;
use crate::explorer::{self, ExplorerConfig};
use crate::parser::Parser;
use crate::report;
use crate::utils::config::Config;
use std::fs;
use std::path::Path;

pub fn handle(
    path: &str,
    feasible_only: bool,
    no_visual: bool,
    graph: Option<&str>,
    format: Option<OutputFormat>,
    config: &Config,
) -> SymResult<()> {
    let source = fs::read_to_string(path)?;
    let wants_visual = config.engine.create_visual && !no_visual;
    let program = Parser::parse_source(&source)?;
    let program = if wants_visual {
        program.with_terminal_marker()
    } else {
        program
    };

    let explorer_config = ExplorerConfig {
        show_unmutated_constraints: config.engine.show_unmutated_constraints,
        only_show_feasible_paths: feasible_only || config.engine.only_show_feasible_paths,
        timeout_ms: config.solver.timeout_ms,
    };
    let result = explorer::explore(&program, &explorer_config)?;

    let format = format.unwrap_or(match config.output.default_format.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Text,
    });
    if !config.output.quiet {
        match format {
            OutputFormat::Text => print!("{}", report::render_text(&result.test_cases)),
            OutputFormat::Json => println!("{}", report::render_json(&result.test_cases)),
        }
    }

    if wants_visual {
        let render_options = RenderOptions {
            show_node_id: config.engine.show_node_id,
            use_html_like_label: config.engine.use_html_like_label,
        };
        let graph_struct = digraph::build_graph(&result.root, &render_options);
        let dot_text = digraph::to_dot(&graph_struct);

        let out_path = graph
            .map(str::to_string)
            .unwrap_or_else(|| default_graph_path(path));
        fs::write(&out_path, dot_text)?;
        tracing::debug!("Wrote exploration digraph to {out_path}");
    }

    Ok(())
}

fn default_graph_path(source_path: &str) -> String {
    let stem = Path::new(source_path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("out");
    format!("{stem}.dot")
}
