//! Interactive walk loop.

use crate::config::crux_dir;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crux_traversal::{Answer, ForcingPoint, ForcingTarget, Traversal, TraversalState};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

/// One line of walk input, parsed against the point being asked.
#[derive(Debug, PartialEq)]
pub enum WalkInput {
    /// Resolve the current point
    Answer(Answer),
    /// Print the decision trail
    Summary,
    /// Print progress counts
    Status,
    /// Print usage
    Help,
    /// Stop and keep the current state
    Quit,
}

/// Run the walk loop until the traversal completes or the user quits.
///
/// Returns the last state reached.
pub fn run_walk(
    traversal: &Traversal<'_>,
    mut state: TraversalState,
    formatter: &Formatter,
    history_size: usize,
) -> Result<TraversalState> {
    println!("{}", formatter.info("Type 'help' for commands, 'quit' to stop"));
    println!();

    let config = rustyline::Config::builder()
        .max_history_size(history_size)?
        .build();
    let mut editor = DefaultEditor::with_config(config)?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    let mut announced: Option<String> = None;

    while let Some(point) = traversal.next_point(&state) {
        if announced.as_deref() != Some(point.id.as_str()) {
            println!("{}", formatter.format_prompt(point));
            announced = Some(point.id.to_string());
        }

        let line = match editor.readline("crux> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'quit' to stop"));
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        editor.add_history_entry(line).ok();

        match parse_walk_input(line, point) {
            Ok(WalkInput::Quit) => break,
            Ok(WalkInput::Help) => print_help(formatter),
            Ok(WalkInput::Summary) => {
                println!("{}", crux_traversal::build_path_summary(&state));
            }
            Ok(WalkInput::Status) => {
                println!("{}", formatter.info(&formatter.format_status(traversal, &state)));
            }
            Ok(WalkInput::Answer(answer)) => match traversal.resolve(&state, &point.id, &answer) {
                Ok(next) => {
                    if let Some(step) = next.path_steps().last() {
                        println!("{}", formatter.success(step));
                    }
                    println!();
                    state = next;
                }
                Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
            },
            Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
        }
    }

    editor.save_history(&history_path).ok();

    Ok(state)
}

/// Parse a line typed while `point` is being asked.
///
/// Conditionals take `y`/`n`, conflicts take a 1-based option number. Any
/// text after the first word is kept as the user's note.
pub fn parse_walk_input(line: &str, point: &ForcingPoint) -> Result<WalkInput> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    let note = (!rest.is_empty()).then(|| rest.to_string());

    match head.to_lowercase().as_str() {
        "quit" | "exit" | "q" => return Ok(WalkInput::Quit),
        "help" | "?" => return Ok(WalkInput::Help),
        "summary" => return Ok(WalkInput::Summary),
        "status" => return Ok(WalkInput::Status),
        _ => {}
    }

    match &point.target {
        ForcingTarget::Conditional { .. } => {
            let satisfied = match head.to_lowercase().as_str() {
                "y" | "yes" => true,
                "n" | "no" => false,
                _ => {
                    return Err(CliError::InvalidInput(
                        "Answer 'y' or 'n', optionally followed by a note".to_string(),
                    ))
                }
            };
            Ok(WalkInput::Answer(Answer::Condition { satisfied, input: note }))
        }
        ForcingTarget::Conflict { options } => {
            let option = head
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| options.get(i))
                .ok_or_else(|| {
                    CliError::InvalidInput(format!(
                        "Pick an option between 1 and {}",
                        options.len()
                    ))
                })?;
            Ok(WalkInput::Answer(Answer::Choice {
                claim: option.claim_id.clone(),
                input: note,
            }))
        }
    }
}

fn get_history_path() -> Result<PathBuf> {
    let dir = crux_dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  y|n [note]          - Answer a condition");
    println!("  <number> [note]     - Pick a conflict option");
    println!("  summary             - Show decisions so far");
    println!("  status              - Show progress");
    println!("  help, ?             - Show this help");
    println!("  quit, exit, q       - Stop walking");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crux_domain::{ClaimId, ClaimType, ConditionalGate, Edge};
    use crux_graph::{ClaimGraph, ClaimGraphInput, ClaimInput, GraphConfig};

    fn graph() -> ClaimGraph {
        ClaimGraph::build(
            ClaimGraphInput::new(1)
                .claim(ClaimInput::new("a", "A", ClaimType::Factual, vec![0]))
                .claim(ClaimInput::new("b", "B", ClaimType::Factual, vec![0]))
                .edge(Edge::conflict("a", "b"))
                .gate(ConditionalGate::new("g", vec!["a".into()], "Cond", "Cond?")),
            GraphConfig::default(),
        )
    }

    #[test]
    fn test_conditional_answers() {
        let graph = graph();
        let traversal = Traversal::new(&graph);
        let point = traversal.point(&"cond:g".into()).unwrap();

        assert_eq!(
            parse_walk_input("Y", point).unwrap(),
            WalkInput::Answer(Answer::condition(true))
        );
        assert_eq!(
            parse_walk_input("no   not on Linux ", point).unwrap(),
            WalkInput::Answer(Answer::Condition {
                satisfied: false,
                input: Some("not on Linux".to_string()),
            })
        );
        assert!(parse_walk_input("2", point).is_err());
    }

    #[test]
    fn test_conflict_answers() {
        let graph = graph();
        let traversal = Traversal::new(&graph);
        let point = traversal.point(&"conflict:a|b".into()).unwrap();

        assert_eq!(
            parse_walk_input("2", point).unwrap(),
            WalkInput::Answer(Answer::Choice {
                claim: ClaimId::new("b"),
                input: None,
            })
        );
        assert!(parse_walk_input("0", point).is_err());
        assert!(parse_walk_input("3", point).is_err());
        assert!(parse_walk_input("y", point).is_err());
    }

    #[test]
    fn test_commands_work_on_any_point() {
        let graph = graph();
        let traversal = Traversal::new(&graph);
        let point = traversal.point(&"conflict:a|b".into()).unwrap();

        assert_eq!(parse_walk_input("summary", point).unwrap(), WalkInput::Summary);
        assert_eq!(parse_walk_input("status", point).unwrap(), WalkInput::Status);
        assert_eq!(parse_walk_input("?", point).unwrap(), WalkInput::Help);
        assert_eq!(parse_walk_input("QUIT", point).unwrap(), WalkInput::Quit);
    }
}
