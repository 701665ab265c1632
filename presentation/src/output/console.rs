//! Console output formatter for query outcomes

use aura_application::QueryOutcome;
use aura_domain::{AgentResult, ExecutionPlan, OutputFormat, truncate};
use colored::Colorize;
use serde_json::Value;

/// Max bytes of agent data shown per line in summary output
const SUMMARY_DATA_BYTES: usize = 160;

/// Formats query outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Force colors off; when enabled, terminal detection decides.
    pub fn set_color(enabled: bool) {
        if !enabled {
            colored::control::set_override(false);
        }
    }

    /// Format an outcome in the requested format
    pub fn render(outcome: &QueryOutcome, format: OutputFormat) -> String {
        match format {
            OutputFormat::Summary => Self::format_summary(outcome),
            OutputFormat::Full => Self::format(outcome),
            OutputFormat::Json => Self::format_json(outcome),
        }
    }

    /// Format the complete outcome
    pub fn format(outcome: &QueryOutcome) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("aura-chain results"));
        output.push('\n');
        output.push_str(&Self::identity(outcome));

        if let Some(error) = &outcome.error {
            output.push_str(&format!("\n{} {}\n", "Planning failed:".red().bold(), error));
            output.push_str(&Self::footer());
            return output;
        }

        if let Some(plan) = &outcome.plan {
            output.push_str(&Self::section_header("Plan"));
            output.push_str(&Self::format_plan(plan));
        }

        if !outcome.guardrails.is_clean() {
            output.push_str(&Self::section_header("Guardrails"));
            for removed in &outcome.guardrails.removed {
                output.push_str(&format!(
                    "  {} {} ({})\n",
                    "-".yellow(),
                    removed.agent,
                    removed.reason
                ));
            }
        }

        if !outcome.skipped.is_empty() {
            output.push_str(&Self::section_header("Skipped Steps"));
            for skipped in &outcome.skipped {
                output.push_str(&format!(
                    "  {} step {} {}: {}\n",
                    "~".yellow(),
                    skipped.index + 1,
                    skipped.agent,
                    skipped.reason
                ));
            }
        }

        output.push_str(&Self::section_header("Agent Results"));
        if outcome.responses.is_empty() {
            output.push_str(&format!("{}\n", "(no agents ran)".dimmed()));
        }
        for result in &outcome.responses {
            output.push_str(&Self::format_result(result));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(outcome: &QueryOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    /// Mode, agents and one line per result
    pub fn format_summary(outcome: &QueryOutcome) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n\n", "=== aura-chain ===".cyan().bold()));
        output.push_str(&Self::identity(outcome));

        if let Some(error) = &outcome.error {
            output.push_str(&format!("\n{} {}\n", "x".red(), error));
            return output;
        }

        if let Some(plan) = &outcome.plan {
            output.push_str(&format!(
                "{} {}\n\n",
                "Agents:".dimmed(),
                plan.agents.join(" -> ")
            ));
        }

        for result in &outcome.responses {
            let line = match (&result.data, &result.error) {
                (Some(data), _) if result.success => {
                    truncate(&Self::data_preview(data), SUMMARY_DATA_BYTES)
                }
                (_, Some(error)) => error.clone(),
                _ => String::new(),
            };
            let mark = if result.success { "v".green() } else { "x".red() };
            output.push_str(&format!("{} {} {}\n", mark, result.agent_name.bold(), line));
        }

        for skipped in &outcome.skipped {
            output.push_str(&format!(
                "{} {} {}\n",
                "~".yellow(),
                skipped.agent.bold(),
                skipped.reason.to_string().dimmed()
            ));
        }

        output
    }

    /// Numbered plan steps with their dependencies
    pub fn format_plan(plan: &ExecutionPlan) -> String {
        let mut output = String::new();

        if !plan.reasoning.is_empty() {
            output.push_str(&format!("{} {}\n", "Reasoning:".dimmed(), plan.reasoning));
        }
        output.push_str(&format!("{} {}\n", "Agents:".dimmed(), plan.agents.join(", ")));

        for (i, step) in plan.steps.iter().enumerate() {
            output.push_str(&format!("  {}. {}", i + 1, step.agent.bold()));
            if !step.depends_on.is_empty() {
                output.push_str(&format!(
                    " {}",
                    format!("(after {})", step.depends_on.join(", ")).dimmed()
                ));
            }
            output.push('\n');
            if let Some(task) = &step.task {
                output.push_str(&Self::indent(task, "     "));
                output.push('\n');
            }
        }

        output
    }

    fn identity(outcome: &QueryOutcome) -> String {
        let mode = outcome
            .mode
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| "open".to_string());
        format!(
            "{} {}\n{} {}\n",
            "Mode:".cyan().bold(),
            mode,
            "Request:".cyan().bold(),
            outcome.request_id.dimmed()
        )
    }

    fn format_result(result: &AgentResult) -> String {
        let elapsed = result
            .metadata
            .get("execution_ms")
            .and_then(Value::as_u64)
            .map(|ms| format!(" ({} ms)", ms))
            .unwrap_or_default();

        if result.success {
            let body = result
                .data
                .as_ref()
                .and_then(|d| serde_json::to_string_pretty(d).ok())
                .unwrap_or_default();
            format!(
                "\n{}{}\n{}\n",
                format!("── {} ──", result.agent_name).yellow().bold(),
                elapsed.dimmed(),
                body
            )
        } else {
            format!(
                "\n{}{}\nError: {}\n",
                format!("── {} ──", result.agent_name).red().bold(),
                elapsed.dimmed(),
                result.error.as_deref().unwrap_or("Unknown")
            )
        }
    }

    /// `insights` text when present, compact JSON otherwise
    fn data_preview(data: &Value) -> String {
        match data.get("insights") {
            Some(Value::String(text)) => text.split_whitespace().collect::<Vec<_>>().join(" "),
            Some(other) => other.to_string(),
            None => data.to_string(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
