use crate::errors::SymResult;
use console::style;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

static DEFAULT_CONFIG_TOML: &str = include_str!("../../default-symx.conf");

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct EngineConfig {
    /// Whether `run` also renders a `petgraph::dot::Dot` digraph.
    pub create_visual: bool,

    /// Whether `If` labels show the raw conjunction (`x > 0 and y < 5`) or
    /// its solver-term rendering.
    pub show_unmutated_constraints: bool,

    /// Whether node labels carry a `Node k:` id prefix.
    pub show_node_id: bool,

    /// Whether `[`/`]` in labels become `<font>` tags (Graphviz HTML-like
    /// labels) rather than literal brackets.
    pub use_html_like_label: bool,

    /// Whether UNSAT terminal nodes (and any ancestor left with no feasible
    /// continuation) are suppressed from the exploration tree.
    pub only_show_feasible_paths: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            create_visual: true,
            show_unmutated_constraints: true,
            show_node_id: true,
            use_html_like_label: true,
            only_show_feasible_paths: false,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OutputConfig {
    /// `"text"` or `"json"`.
    pub default_format: String,

    pub quiet: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".into(),
            quiet: false,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SolverConfig {
    pub timeout_ms: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self { timeout_ms: 2000 }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub output: OutputConfig,
    pub solver: SolverConfig,
}

impl Config {
    pub fn load(config_dir: &Path) -> SymResult<Self> {
        let mut config = Config::default();

        let default_config_path = config_dir.join("symx.conf");
        if !default_config_path.exists() {
            create_example_config(config_dir)?;
        }

        let user_config_path = config_dir.join("symx.local");
        if user_config_path.exists() {
            let user_config_content = fs::read_to_string(&user_config_path)?;
            let user_config: Config = toml::from_str(&user_config_content)?;

            config = merge_configs(config, user_config);

            println!(
                "{}: Loaded user config from: {}\n",
                style("note").green().bold(),
                style(user_config_path.display()).underlined().white().bold()
            );
        } else {
            println!(
                "{}: Using {} configuration.\n      Create file in '{}' to customize.\n",
                style("note").green().bold(),
                style("default").bold(),
                style(user_config_path.display()).underlined().white().bold()
            );
        }

        Ok(config)
    }
}

fn create_example_config(config_dir: &Path) -> SymResult<()> {
    let example_path = config_dir.join("symx.conf");
    if !example_path.exists() {
        fs::write(&example_path, DEFAULT_CONFIG_TOML)?;
        tracing::debug!("Example config created at: {}", example_path.display());
    }
    Ok(())
}

/// Merge user config into default config: the user's values win wherever
/// present, defaults fill the rest.
fn merge_configs(mut default: Config, user: Config) -> Config {
    default.engine.create_visual = user.engine.create_visual;
    default.engine.show_unmutated_constraints = user.engine.show_unmutated_constraints;
    default.engine.show_node_id = user.engine.show_node_id;
    default.engine.use_html_like_label = user.engine.use_html_like_label;
    default.engine.only_show_feasible_paths = user.engine.only_show_feasible_paths;

    default.output.default_format = user.output.default_format;
    default.output.quiet = user.output.quiet;

    default.solver.timeout_ms = user.solver.timeout_ms;

    default
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_configs_prefers_user_values() {
        let default_cfg = Config::default();
        let mut user_cfg = Config::default();
        user_cfg.engine.only_show_feasible_paths = true;
        user_cfg.output.default_format = "json".into();

        let merged = merge_configs(default_cfg, user_cfg);
        assert!(merged.engine.only_show_feasible_paths);
        assert_eq!(merged.output.default_format, "json");
    }

    #[test]
    fn load_creates_example_and_reads_user_overrides() {
        let cfg_dir = tempfile::tempdir().unwrap();
        let cfg_path = cfg_dir.path();

        let user_toml = r#"
            [engine]
            only_show_feasible_paths = true

            [output]
            default_format = "json"
        "#;
        fs::write(cfg_path.join("symx.local"), user_toml).unwrap();

        let cfg = Config::load(cfg_path).expect("Config::load should succeed");

        assert!(cfg_path.join("symx.conf").is_file());
        assert!(cfg.engine.only_show_feasible_paths);
        assert_eq!(cfg.output.default_format, "json");
        assert!(cfg.engine.show_node_id);
    }
}
