//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use crux_domain::Role;
use crux_graph::ClaimGraph;
use crux_traversal::{ForcingPoint, ForcingTarget, Traversal, TraversalOutcome, TraversalState};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a graph report: claims, tensions, cycles and diagnostics.
    pub fn format_graph(&self, graph: &ClaimGraph) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_graph_json(graph),
            OutputFormat::Table => Ok(self.format_graph_table(graph)),
        }
    }

    fn format_graph_json(&self, graph: &ClaimGraph) -> Result<String> {
        let claims: Vec<_> = graph.claims().collect();
        let report = serde_json::json!({
            "total_perspectives": graph.total_perspectives(),
            "claims": claims,
            "tensions": graph.tensions(),
            "cycles": graph.cycles(),
            "diagnostics": graph.diagnostics(),
        });
        Ok(serde_json::to_string_pretty(&report)?)
    }

    fn format_graph_table(&self, graph: &ClaimGraph) -> String {
        if graph.is_empty() {
            return self.colorize("No claims found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Label", "Type", "Role", "Tier", "Support"]);
        for claim in graph.claims() {
            builder.push_record([
                claim.id.to_string(),
                claim.label.clone(),
                claim.claim_type.as_str().to_string(),
                self.role(claim.role),
                claim.tier.to_string(),
                format!("{:.2}", claim.support_ratio),
            ]);
        }
        let mut sections = vec![render(builder)];

        if !graph.tensions().is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["Claims", "Tier", "Question"]);
            for tension in graph.tensions() {
                builder.push_record([
                    format!("{} / {}", tension.a, tension.b),
                    tension.tier.to_string(),
                    tension.question.clone().unwrap_or_default(),
                ]);
            }
            sections.push(format!("{}\n{}", self.colorize("Tensions", "cyan"), render(builder)));
        }

        for diagnostic in graph.diagnostics() {
            sections.push(self.warning(&diagnostic.to_string()));
        }

        sections.join("\n\n")
    }

    /// Format the ordered forcing-point list.
    pub fn format_points(&self, points: &[ForcingPoint]) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(points)?);
        }
        if points.is_empty() {
            return Ok(self.colorize("No forcing points: nothing to decide.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "ID", "Kind", "Tier", "Question", "Blocked by"]);
        for (i, point) in points.iter().enumerate() {
            let blocked: Vec<String> = point.blocked_by.iter().map(|id| id.to_string()).collect();
            builder.push_record([
                (i + 1).to_string(),
                point.id.to_string(),
                point.kind().to_string(),
                point.tier.to_string(),
                point.question.clone(),
                blocked.join(", "),
            ]);
        }
        Ok(render(builder))
    }

    /// Render a forcing point as a prompt for the walk loop.
    pub fn format_prompt(&self, point: &ForcingPoint) -> String {
        let mut lines = vec![self.colorize(&point.question, "cyan")];
        match &point.target {
            ForcingTarget::Conditional { .. } => {
                if let Some(condition) = &point.condition {
                    lines.push(format!("  Condition: {}", condition));
                }
                lines.push("  Answer y or n, optionally followed by a note".to_string());
            }
            ForcingTarget::Conflict { options } => {
                for (i, option) in options.iter().enumerate() {
                    lines.push(format!(
                        "  {}. {} ({})",
                        i + 1,
                        option.label,
                        self.role(option.role)
                    ));
                }
                lines.push(
                    "  Answer with an option number, optionally followed by a note".to_string(),
                );
            }
        }
        lines.join("\n")
    }

    /// Format the progress of a traversal.
    pub fn format_status(&self, traversal: &Traversal<'_>, state: &TraversalState) -> String {
        format!(
            "{} resolved, {} open, {} active claim(s), {} pruned",
            state.resolutions().len(),
            traversal.live_points(state).len(),
            state.active_claims().count(),
            state.pruned_claims().count(),
        )
    }

    /// Format a traversal outcome.
    pub fn format_outcome(&self, outcome: &TraversalOutcome) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(outcome)?);
        }

        let join = |ids: &[crux_domain::ClaimId]| {
            if ids.is_empty() {
                "-".to_string()
            } else {
                ids.iter().map(|id| id.as_str()).collect::<Vec<_>>().join(", ")
            }
        };
        let headline = if outcome.complete {
            self.success("Traversal complete")
        } else {
            self.warning("Traversal incomplete")
        };

        Ok(format!(
            "{}\n\n{}\n\nActive: {}\nPruned: {}",
            headline,
            outcome.summary,
            join(&outcome.active),
            join(&outcome.pruned),
        ))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn role(&self, role: Role) -> String {
        match role {
            Role::Anchor => role.as_str().to_string(),
            Role::Challenger => self.colorize(role.as_str(), "magenta"),
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn render(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}
