//! CLI definition using clap.
//!
//! Running with no arguments prints the ten lines with the built-in defaults.

use clap::Parser;
use oddeven::domain::Mode;
use std::path::PathBuf;

/// oddeven - two tasks take turns printing odd and even numbers
#[derive(Parser, Debug)]
#[command(name = "oddeven")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print a run summary to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Iteration bound for both workers (overrides config)
    #[arg(short = 'n', long)]
    pub limit: Option<u64>,

    /// Coordination protocol (overrides config)
    #[arg(short, long, value_enum)]
    pub mode: Option<Mode>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}
