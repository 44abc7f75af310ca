pub mod ast;
pub mod check;
pub mod run;

use crate::cli::Commands;
use crate::errors::SymResult;
use crate::utils::config::Config;

pub fn handle_command(command: Commands, config: &Config) -> SymResult<()> {
    match command {
        Commands::Run {
            path,
            feasible_only,
            no_visual,
            graph,
            format,
        } => run::handle(&path, feasible_only, no_visual, graph.as_deref(), format, config),
        Commands::Ast { path } => ast::handle(&path),
        Commands::Check { path } => check::handle(&path, config),
    }
}
