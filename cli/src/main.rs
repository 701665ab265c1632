//! CLI entrypoint for aura-chain
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use aura_application::{
    NoProgress, OrchestrationProgress, PlanningStrategy, ReasoningService, RunJournal,
    RunQueryInput, RunQueryUseCase,
};
use aura_domain::{ContextMap, DATASET_ID_KEY, OutputFormat, Query, Severity};
use aura_infrastructure::{
    ConfigLoader, ConfiguredAgentFactory, FallbackReasoningService, FileConfig, GeminiConfig,
    GeminiReasoningService, JsonlRunJournal, LocalDatasetLoader,
};
use aura_presentation::{Cli, ConsoleFormatter, ProgressReporter, SimpleProgress};
use clap::Parser;
use serde_json::Value;
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_guard = init_logging(&cli)?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = load_config(&cli)?;
    ConsoleFormatter::set_color(config.output.color);

    let Some(text) = cli.query.as_deref() else {
        bail!("A query is required, e.g. aura-chain \"Show me sales trends\"");
    };
    let query = Query::new(text)?;

    info!("Starting aura-chain");

    let mut settings = config.orchestrator_settings();
    if let Some(strategy) = cli.strategy {
        settings = settings.with_strategy(PlanningStrategy::from(strategy));
    }

    // === Dependency Injection ===
    let gemini = GeminiConfig::from_file(&config.reasoning);
    if gemini.api_key.is_none() {
        warn!(
            "No API key found in {}; reasoning calls will fail",
            gemini.api_key_env
        );
    }
    let mut reasoning: Arc<dyn ReasoningService> = Arc::new(
        GeminiReasoningService::new(gemini).context("Failed to build the Gemini client")?,
    );
    if config.reasoning.fallback {
        reasoning = Arc::new(FallbackReasoningService::new(reasoning));
    }

    let factory = Arc::new(ConfiguredAgentFactory::new(
        reasoning.clone(),
        settings.planner_model.clone(),
        config.agents.clone(),
    ));

    let mut use_case = RunQueryUseCase::new(reasoning, factory, settings);
    let journal_path = cli.journal.clone().or_else(|| config.journal.resolved_path());
    if let Some(path) = journal_path
        && let Some(journal) = JsonlRunJournal::open(&path)
    {
        info!("Journaling run to {}", journal.path().display());
        use_case = use_case.with_journal(Arc::new(journal) as Arc<dyn RunJournal>);
    }

    let mut input = RunQueryInput::new(query).with_context(build_context(&cli)?);
    if let Some(session_id) = &cli.session_id {
        input = input.with_session_id(session_id);
    }
    if let Some(user_id) = &cli.user_id {
        input = input.with_user_id(user_id);
    }
    if cli.plan_only {
        input = input.plan_only();
    }

    let progress: Box<dyn OrchestrationProgress> = if cli.quiet || !config.output.show_progress {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };

    let outcome = use_case.execute_with_progress(input, progress.as_ref()).await;

    let format = cli
        .output
        .map(OutputFormat::from)
        .or(config.output.format)
        .unwrap_or_default();

    let output = match (&outcome.plan, cli.plan_only, format) {
        (Some(plan), true, OutputFormat::Summary | OutputFormat::Full) => {
            ConsoleFormatter::format_plan(plan)
        }
        _ => ConsoleFormatter::render(&outcome, format),
    };
    println!("{}", output);

    if !outcome.success {
        drop(log_guard);
        std::process::exit(1);
    }

    Ok(())
}

/// Install the tracing subscriber; the guard must live until exit.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    match &cli.log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| std::path::Path::new("."));
            let Some(file_name) = path.file_name() else {
                bail!("--log-file must name a file: {}", path.display());
            };
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
            Ok(None)
        }
    }
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };

    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Warning => warn!("config: {}", issue.message),
            Severity::Error => eprintln!("config error: {}", issue.message),
        }
    }
    if issues.iter().any(|i| i.is_error()) {
        bail!("Invalid configuration");
    }

    Ok(config)
}

/// Request context: `--context` pairs and `--dataset-id`, then the dataset
/// file (which never overrides keys already set).
fn build_context(cli: &Cli) -> Result<ContextMap> {
    let mut context: ContextMap = cli.context.iter().cloned().collect();

    if let Some(id) = &cli.dataset_id {
        context.insert(DATASET_ID_KEY.to_string(), Value::String(id.clone()));
    }

    if let Some(path) = &cli.dataset {
        LocalDatasetLoader::new().load_into(path, &mut context)?;
    }

    Ok(context)
}
