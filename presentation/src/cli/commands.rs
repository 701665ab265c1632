//! CLI command definitions

use aura_application::PlanningStrategy;
use aura_domain::OutputFormat;
use clap::{Parser, ValueEnum};
use serde_json::Value;
use std::path::PathBuf;

/// Output format for query outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    /// Mode, plan and one line per agent
    Summary,
    /// Plan, guardrail removals, skipped steps and agent data
    Full,
    /// The outcome as JSON
    Json,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Summary => OutputFormat::Summary,
            OutputArg::Full => OutputFormat::Full,
            OutputArg::Json => OutputFormat::Json,
        }
    }
}

/// Planning strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Detect the operating mode and filter the plan for it
    Guarded,
    /// Let the planner choose freely (notifier rule still enforced)
    Open,
}

impl From<StrategyArg> for PlanningStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Guarded => PlanningStrategy::Guarded,
            StrategyArg::Open => PlanningStrategy::Open,
        }
    }
}

/// CLI arguments for aura-chain
#[derive(Parser, Debug)]
#[command(name = "aura-chain")]
#[command(author, version, about = "Supply chain analytics orchestrator - plan and run a chain of agents for a query")]
#[command(long_about = r#"
aura-chain answers a supply chain question by planning a chain of agents.

Each query goes through three stages:
1. Mode detection: cold_start (no dataset), deep_dive or ad_hoc
2. Planning: one reasoning call proposes agents, then guardrails filter them
3. Execution: agents run in plan order, each seeing its dependencies' outputs

Configuration files are loaded from (in priority order):
1. AURA_* environment variables (e.g. AURA_PLANNER__MODEL)
2. --config <path>     Explicit config file
3. ./aura.toml         Project-level config
4. ~/.config/aura-chain/config.toml   Global config

Example:
  aura-chain "Show me sneaker sales trends"
  aura-chain --dataset sales.json "Optimize inventory for next quarter"
  aura-chain --dataset-id 7f3c --plan-only "Order more of the best sellers"
"#)]
pub struct Cli {
    /// The question to answer
    pub query: Option<String>,

    /// Dataset file to attach (JSON records or CSV with a header row)
    #[arg(short, long, value_name = "FILE")]
    pub dataset: Option<PathBuf>,

    /// Dataset identifier to attach to the context
    #[arg(long, value_name = "ID")]
    pub dataset_id: Option<String>,

    /// Extra context entries (value parsed as JSON when possible)
    #[arg(short = 'C', long = "context", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub context: Vec<(String, Value)>,

    /// Session identifier (generated when absent)
    #[arg(long, value_name = "ID")]
    pub session_id: Option<String>,

    /// User identifier passed to agents
    #[arg(long, value_name = "ID")]
    pub user_id: Option<String>,

    /// Planning strategy (overrides config)
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Output format (overrides config)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputArg>,

    /// Print the filtered plan without running any agent
    #[arg(long)]
    pub plan_only: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Append run events as JSON lines to this file (overrides config)
    #[arg(long, value_name = "PATH")]
    pub journal: Option<PathBuf>,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Parse `key=value`; the value is JSON if it parses, a string otherwise.
pub fn parse_key_value(s: &str) -> Result<(String, Value), String> {
    let (key, raw) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}
