//! Walk command implementation.

use super::load_graph;
use crate::cli::WalkArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::repl;
use crux_traversal::{Traversal, TraversalSnapshot, TraversalState};
use std::fs;
use std::path::Path;

const DEFAULT_TURN_ID: &str = "turn-1";

/// Execute the walk command.
pub fn execute_walk(args: WalkArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let graph = load_graph(&args.graph, &config.graph)?;
    let traversal = Traversal::new(&graph);

    let (state, resumed_turn) = match &args.resume {
        Some(path) => {
            let snapshot = load_snapshot(path)?;
            let state = resume_state(&traversal, snapshot.state)?;
            println!(
                "{}",
                formatter.info(&format!(
                    "Resumed turn {} with {} decision(s)",
                    snapshot.turn_id,
                    state.resolutions().len()
                ))
            );
            (state, Some(snapshot.turn_id))
        }
        None => (traversal.start(), None),
    };

    let state = if traversal.is_complete(&state) {
        println!("{}", formatter.info("Nothing left to decide"));
        state
    } else {
        repl::run_walk(&traversal, state, formatter, config.settings.history_size)?
    };

    println!("{}", formatter.format_outcome(&traversal.outcome(&state))?);

    if let Some(path) = &args.save {
        let turn_id = args
            .turn
            .or(resumed_turn)
            .unwrap_or_else(|| DEFAULT_TURN_ID.to_string());
        save_snapshot(path, &TraversalSnapshot::new(turn_id, state))?;
        println!("{}", formatter.success(&format!("Snapshot saved to {}", path.display())));
    }

    Ok(())
}

/// Read a snapshot written by a previous walk.
pub fn load_snapshot(path: &Path) -> Result<TraversalSnapshot> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Write a snapshot as pretty JSON.
pub fn save_snapshot(path: &Path, snapshot: &TraversalSnapshot) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(snapshot)?)?;
    Ok(())
}

/// Check that a saved state belongs to this graph before continuing it.
///
/// The claim set must match exactly and every recorded resolution must name
/// a forcing point of this graph.
pub fn resume_state(traversal: &Traversal<'_>, state: TraversalState) -> Result<TraversalState> {
    let graph = traversal.graph();
    let same_claims = state.claim_status().len() == graph.len()
        && state.claim_status().keys().all(|id| graph.contains(id));
    if !same_claims {
        return Err(CliError::InvalidInput(
            "Snapshot claims do not match the graph document".to_string(),
        ));
    }

    if let Some(unknown) = state
        .resolutions()
        .keys()
        .find(|id| traversal.point(id).is_none())
    {
        return Err(CliError::InvalidInput(format!(
            "Snapshot resolves unknown forcing point '{}'",
            unknown
        )));
    }

    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crux_domain::{ClaimType, Edge};
    use crux_graph::{ClaimGraph, ClaimGraphInput, ClaimInput, GraphConfig};
    use crux_traversal::Answer;
    use tempfile::TempDir;

    fn graph(extra: bool) -> ClaimGraph {
        let mut input = ClaimGraphInput::new(2)
            .claim(ClaimInput::new("a", "A", ClaimType::Factual, vec![0]))
            .claim(ClaimInput::new("b", "B", ClaimType::Factual, vec![1]))
            .edge(Edge::conflict("a", "b"));
        if extra {
            input = input.claim(ClaimInput::new("c", "C", ClaimType::Factual, vec![1]));
        }
        ClaimGraph::build(input, GraphConfig::default())
    }

    #[test]
    fn test_snapshot_file_roundtrip_and_resume() {
        let graph = graph(false);
        let traversal = Traversal::new(&graph);
        let state = traversal
            .resolve(&traversal.start(), &"conflict:a|b".into(), &Answer::choice("a"))
            .unwrap();

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state").join("turn.json");
        save_snapshot(&path, &TraversalSnapshot::new("t-9", state.clone())).unwrap();

        let snapshot = load_snapshot(&path).unwrap();
        assert_eq!(snapshot.turn_id, "t-9");
        let resumed = resume_state(&traversal, snapshot.state).unwrap();
        assert_eq!(resumed, state);
        assert!(traversal.is_complete(&resumed));
    }

    #[test]
    fn test_resume_rejects_other_graph() {
        let small = graph(false);
        let large = graph(true);
        let state = Traversal::new(&small).start();

        let err = resume_state(&Traversal::new(&large), state).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
    }
}
