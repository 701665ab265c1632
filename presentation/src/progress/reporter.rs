//! Progress reporting for query orchestration

use aura_application::OrchestrationProgress;
use aura_domain::{AgentKind, AgentResult, ExecutionPlan, OperatingMode, SkippedStep};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with an indicatif spinner and step bar
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn step_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock()
            && let Some(bar) = guard.as_ref()
        {
            f(bar);
        }
    }

    fn replace_bar(&self, bar: Option<ProgressBar>) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(old) = guard.take() {
                old.finish_and_clear();
            }
            *guard = bar;
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl OrchestrationProgress for ProgressReporter {
    fn on_mode_detected(&self, mode: Option<OperatingMode>) {
        let label = mode.map(|m| m.as_str()).unwrap_or("open planning");
        eprintln!("{} {} {}", "->".cyan(), "Mode:".bold(), label);
    }

    fn on_planning_start(&self) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(Self::spinner_style());
        spinner.set_prefix("Planning");
        spinner.set_message("asking the planner...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.replace_bar(Some(spinner));
    }

    fn on_plan_ready(&self, plan: &ExecutionPlan) {
        self.replace_bar(None);
        eprintln!(
            "{} {} {}",
            "->".cyan(),
            "Plan:".bold(),
            plan.agents.join(" -> ")
        );

        let bar = ProgressBar::new(plan.steps.len() as u64);
        bar.set_style(Self::step_style());
        bar.set_prefix("Agents");
        self.replace_bar(Some(bar));
    }

    fn on_plan_failed(&self, error: &str) {
        self.replace_bar(None);
        eprintln!("{} {} {}", "x".red(), "Planning failed:".bold(), error);
    }

    fn on_step_start(&self, _index: usize, _total: usize, agent: AgentKind) {
        self.with_bar(|bar| bar.set_message(format!("{}...", agent)));
    }

    fn on_step_skipped(&self, skipped: &SkippedStep) {
        self.with_bar(|bar| {
            bar.println(format!("  {} {} ({})", "~".yellow(), skipped.agent, skipped.reason));
            bar.inc(1);
        });
    }

    fn on_step_complete(&self, _index: usize, result: &AgentResult) {
        self.with_bar(|bar| {
            let status = if result.success {
                format!("{} {}", "v".green(), result.agent_name)
            } else {
                format!("{} {}", "x".red(), result.agent_name)
            };
            bar.set_message(status);
            bar.inc(1);
        });
    }

    fn on_execution_complete(&self, succeeded: usize, failed: usize, skipped: usize) {
        if let Ok(mut guard) = self.bar.lock()
            && let Some(bar) = guard.take()
        {
            bar.finish_with_message(format!(
                "{} ok, {} failed, {} skipped",
                succeeded.to_string().green(),
                failed.to_string().red(),
                skipped.to_string().yellow()
            ));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl OrchestrationProgress for SimpleProgress {
    fn on_mode_detected(&self, mode: Option<OperatingMode>) {
        let label = mode.map(|m| m.as_str()).unwrap_or("open planning");
        eprintln!("{} {} {}", "->".cyan(), "Mode:".bold(), label);
    }

    fn on_plan_ready(&self, plan: &ExecutionPlan) {
        eprintln!(
            "{} {} ({} steps)",
            "->".cyan(),
            plan.agents.join(", ").bold(),
            plan.steps.len()
        );
    }

    fn on_plan_failed(&self, error: &str) {
        eprintln!("  {} {}", "x".red(), error);
    }

    fn on_step_skipped(&self, skipped: &SkippedStep) {
        eprintln!("  {} {} ({})", "~".yellow(), skipped.agent, skipped.reason);
    }

    fn on_step_complete(&self, _index: usize, result: &AgentResult) {
        if result.success {
            eprintln!("  {} {}", "v".green(), result.agent_name);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), result.agent_name);
        }
    }
}
