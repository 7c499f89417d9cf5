//! Inspect command implementation.

use super::load_graph;
use crate::cli::GraphArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the inspect command.
pub fn execute_inspect(args: GraphArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let graph = load_graph(&args.graph, &config.graph)?;
    println!("{}", formatter.format_graph(&graph)?);
    Ok(())
}
