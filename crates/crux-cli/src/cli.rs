//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Crux CLI - Inspect claim graphs and walk their decision points.
#[derive(Debug, Parser)]
#[command(name = "crux")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CRUX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the support delta threshold for this run
    #[arg(long, global = true)]
    pub delta: Option<f64>,

    /// Override the high-support threshold for this run
    #[arg(long, global = true)]
    pub high_support: Option<f64>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show claims, tensions, cycles and diagnostics of a graph document
    Inspect(GraphArgs),

    /// List the ordered forcing points of a graph document
    Points(GraphArgs),

    /// Answer forcing points interactively
    Walk(WalkArgs),

    /// Show the effective configuration
    Config(ConfigArgs),
}

/// Arguments shared by commands that read a graph document.
#[derive(Debug, Parser)]
pub struct GraphArgs {
    /// JSON claim-graph document
    pub graph: PathBuf,
}

/// Arguments for the walk command.
#[derive(Debug, Parser)]
pub struct WalkArgs {
    /// JSON claim-graph document
    pub graph: PathBuf,

    /// Resume from a saved traversal snapshot
    #[arg(short, long)]
    pub resume: Option<PathBuf>,

    /// Write the final traversal snapshot here
    #[arg(short, long)]
    pub save: Option<PathBuf>,

    /// Conversation turn id recorded in the snapshot
    #[arg(short, long)]
    pub turn: Option<String>,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    /// Write the effective configuration to the config file
    #[arg(long)]
    pub write: bool,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}
