use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "symx")]
#[command(about = "A symbolic execution path explorer for a small imperative language")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse, explore every path, and print the ordered test cases.
    Run {
        /// Source file to explore.
        path: String,

        /// Suppress UNSAT paths (and any ancestor left with no feasible
        /// continuation) from the output.
        #[arg(long)]
        feasible_only: bool,

        /// Skip building the Graphviz digraph even if the config enables it.
        #[arg(long)]
        no_visual: bool,

        /// Write the exploration digraph as DOT text to this path.
        #[arg(long, value_name = "OUT.dot")]
        graph: Option<String>,

        /// Output format for the test case table.
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Parse a source file and print its AST (debugging aid).
    Ast { path: String },

    /// Parse and explore a source file, printing nothing; exit nonzero on
    /// any fatal error.
    Check { path: String },
}
