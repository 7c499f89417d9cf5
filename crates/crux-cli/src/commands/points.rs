//! Points command implementation.

use super::load_graph;
use crate::cli::GraphArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crux_traversal::Traversal;

/// Execute the points command.
pub fn execute_points(args: GraphArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let graph = load_graph(&args.graph, &config.graph)?;
    let traversal = Traversal::new(&graph);
    println!("{}", formatter.format_points(traversal.forcing_points())?);
    Ok(())
}
