//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::{Color, Colorize};
use ria_client::HealthStatus;
use ria_domain::{Citation, Evidence, Metrics, NormalizedAnswer, Review, RetrievalTrace};
use ria_linker::{citing_steps, EvidenceIndex, Navigation};
use serde_json::json;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

const DEFAULT_SNIPPET_WIDTH: usize = 160;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
    snippet_width: usize,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
            snippet_width: DEFAULT_SNIPPET_WIDTH,
        }
    }

    /// Set the evidence table's snippet width.
    pub fn with_snippet_width(mut self, width: usize) -> Self {
        self.snippet_width = width;
        self
    }

    /// Output format in use.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a normalized answer.
    pub fn format_answer(&self, answer: &NormalizedAnswer) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(answer)?),
            OutputFormat::Table => Ok(self.format_answer_table(answer)),
            OutputFormat::Quiet => Ok(format_answer_quiet(answer)),
        }
    }

    /// Format the evidence card a citation led to.
    pub fn format_evidence_card(&self, navigation: &Navigation<'_>, cited_by: &[usize]) -> Result<String> {
        let evidence = navigation.evidence;
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "position": navigation.position,
                "evidence": evidence,
                "citedBy": cited_by.iter().map(|i| i + 1).collect::<Vec<_>>(),
            }))?),
            OutputFormat::Quiet => Ok(evidence.snippet.clone()),
            OutputFormat::Table => {
                let mut lines = vec![
                    self.colorize(&format!("▶ {}", evidence.title), Color::Yellow),
                    format!("  ID:       {}", evidence.id.as_deref().unwrap_or("-")),
                    format!("  Round:    {}", evidence.round),
                    format!("  Location: {}", evidence.meta),
                    format!("  Card:     #{}", navigation.position + 1),
                ];
                if !cited_by.is_empty() {
                    lines.push(format!("  Cited by: step {}", step_list(cited_by)));
                }
                lines.push(String::new());
                lines.push(evidence.snippet.clone());
                Ok(lines.join("\n").trim_end().to_string())
            }
        }
    }

    /// Format a health check result.
    pub fn format_health(&self, endpoint: &str, health: &HealthStatus) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "endpoint": endpoint,
                "ok": health.ok,
                "service": health.service,
            }))?),
            OutputFormat::Quiet => Ok(if health.ok { "ok" } else { "down" }.to_string()),
            OutputFormat::Table => {
                let service = health.service.as_deref().unwrap_or("unknown service");
                let message = format!("{} at {}", service, endpoint);
                Ok(if health.ok {
                    self.success(&message)
                } else {
                    self.error(&format!("{} reports not ok", message))
                })
            }
        }
    }

    fn format_answer_table(&self, answer: &NormalizedAnswer) -> String {
        let index = EvidenceIndex::new(&answer.evidence);
        let mut lines = vec![self.metrics_line(&answer.metrics)];

        if !answer.plan.is_empty() {
            lines.push(String::new());
            lines.push(self.colorize("Plan", Color::Magenta));
            for (i, item) in answer.plan.iter().enumerate() {
                lines.push(format!("  {}. {}", i + 1, item));
            }
        }

        for (i, step) in answer.answer.steps.iter().enumerate() {
            let heading = format!("{}. {}", i + 1, step.title);
            lines.push(String::new());
            lines.push(self.colorize(&heading, Color::Cyan));
            lines.push(step.body.trim_end().to_string());
            if !step.citations.is_empty() {
                lines.push(format!("  Sources: {}", self.chips(&step.citations, &index)));
            }
        }

        if !answer.answer.commands.is_empty() {
            lines.push(String::new());
            lines.push(self.colorize("Commands", Color::Magenta));
            for command in &answer.answer.commands {
                lines.push(format!("  $ {}", command.cmd));
                if !command.citations.is_empty() {
                    lines.push(format!("    {}", self.chips(&command.citations, &index)));
                }
            }
        }

        if let Some(review) = &answer.review {
            lines.extend(self.review_lines(review));
        }

        let dangling = index.dangling(answer);
        if !dangling.is_empty() {
            let ids: Vec<&str> = dangling.iter().map(|c| c.evidence_id.as_str()).collect();
            lines.push(String::new());
            lines.push(self.warning(&format!(
                "{} citation(s) point at missing evidence: {}",
                ids.len(),
                ids.join(", ")
            )));
        }

        lines.push(String::new());
        lines.push(self.colorize("Evidence", Color::Magenta));
        if answer.evidence.is_empty() {
            lines.push(self.colorize("No evidence returned.", Color::Yellow));
        } else {
            lines.push(self.evidence_table(answer));
        }

        if let Some(trace) = answer.trace.as_ref().filter(|t| !t.is_empty()) {
            lines.push(String::new());
            lines.push(trace_line(trace));
        }

        lines.join("\n").trim_end().to_string()
    }

    fn metrics_line(&self, metrics: &Metrics) -> String {
        let coverage = metrics
            .citation_coverage
            .map(|c| format!("{:.0}%", c * 100.0))
            .unwrap_or_else(|| "n/a".to_string());
        let unsupported = metrics
            .unsupported_claims
            .map(|n| n.to_string())
            .unwrap_or_else(|| "n/a".to_string());
        format!(
            "{} {}   {} {}",
            self.colorize("Citation coverage:", Color::Blue),
            coverage,
            self.colorize("Unsupported claims:", Color::Blue),
            unsupported
        )
    }

    /// Citation chips; chips without evidence are marked
    fn chips(&self, citations: &[Citation], index: &EvidenceIndex) -> String {
        citations
            .iter()
            .map(|c| {
                let chip = format!("[{} #{}]", c, c.evidence_id);
                if index.contains(&c.evidence_id) {
                    self.colorize(&chip, Color::Green)
                } else {
                    self.colorize(&format!("{}?", chip), Color::Yellow)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Review warning, preceded by a blank line; empty when nothing needs confirming
    fn review_lines(&self, review: &Review) -> Vec<String> {
        if !review.needs_confirmation && review.unsupported_claim_texts.is_empty() {
            return Vec::new();
        }
        let mut lines = vec![
            String::new(),
            self.warning("Some claims need confirmation against the cited documents"),
        ];
        lines.extend(review.unsupported_claim_texts.iter().map(|claim| format!("  - {}", claim)));
        lines
    }

    fn evidence_table(&self, answer: &NormalizedAnswer) -> String {
        let mut builder = Builder::default();
        builder.push_record(["#", "ID", "Round", "Source", "Location", "Cited by", "Snippet"]);

        for (position, evidence) in answer.evidence.iter().enumerate() {
            let cited_by = evidence
                .id
                .as_deref()
                .map(|id| step_list(&citing_steps(answer, id)))
                .unwrap_or_default();
            builder.push_record([
                (position + 1).to_string(),
                evidence.id.clone().unwrap_or_else(|| "-".to_string()),
                evidence.round.to_string(),
                evidence.title.clone(),
                evidence.meta.clone(),
                cited_by,
                self.snippet(evidence),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Snippet flattened to one line and cut to the configured width
    fn snippet(&self, evidence: &Evidence) -> String {
        let flat = evidence.snippet.split_whitespace().collect::<Vec<_>>().join(" ");
        if flat.chars().count() <= self.snippet_width {
            return flat;
        }
        let mut cut: String = flat.chars().take(self.snippet_width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), Color::Green)
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), Color::Red)
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), Color::Blue)
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), Color::Yellow)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: Color) -> String {
        if self.color_enabled {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }
}

fn format_answer_quiet(answer: &NormalizedAnswer) -> String {
    let mut parts: Vec<&str> = answer.answer.steps.iter().map(|s| s.body.trim_end()).collect();
    parts.extend(answer.answer.commands.iter().map(|c| c.cmd.as_str()));
    parts.join("\n")
}

/// One-based, comma separated step numbers
fn step_list(steps: &[usize]) -> String {
    steps
        .iter()
        .map(|i| (i + 1).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn trace_line(trace: &RetrievalTrace) -> String {
    let mut parts = Vec::new();
    if let Some(iterations) = trace.iterations {
        parts.push(format!("{} iteration(s)", iterations));
    }
    if let Some(chunks) = trace.total_unique_chunks {
        parts.push(format!("{} unique chunk(s)", chunks));
    }
    if let Some(reason) = &trace.stop_reason {
        parts.push(format!("stopped: {}", reason));
    }
    let mut lines = vec![format!("Retrieval: {}", parts.join(", "))];
    if let Some(query) = &trace.final_query {
        lines.push(format!("  Final query: {}", query));
    }
    lines.extend(trace.refined_queries.iter().map(|query| format!("  Refined: {}", query)));
    lines.join("\n")
}
