//! Domain layer for aura-chain
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Operating Mode
//!
//! Every query is classified before planning:
//!
//! - **cold_start**: no dataset attached, external signals only
//! - **deep_dive**: dataset attached and an analysis, optimization or order request
//! - **ad_hoc**: dataset attached and a targeted question
//!
//! Each mode carries a deny-list of agents that the guardrail filter enforces
//! on whatever plan the reasoning service proposes.
//!
//! ## Execution Plan
//!
//! An ordered list of agent steps with per-step tasks, parameters and
//! `depends_on` constraints. Agent names are matched after normalization
//! (case and `_`/` `/`-` insensitive) against the closed [`AgentKind`] set.

pub mod agent;
pub mod config;
pub mod core;
pub mod dataset;
pub mod execution;
pub mod mode;
pub mod plan;
pub mod prompt;

// Re-export commonly used types
pub use agent::{AgentKind, AgentRequest, AgentResult, ContextMap, normalize_agent_name};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{error::DomainError, query::Query, string::truncate};
pub use dataset::DatasetSummary;
pub use execution::{ExecutionContext, ExecutionReport, SkipReason, SkippedStep};
pub use mode::{DATASET_ID_KEY, DATASET_KEY, ModeDetector, OperatingMode, has_dataset};
pub use plan::{
    ExecutionPlan, GuardrailReport, PlanError, PlanStep, RemovalReason, RemovedAgent,
    apply_guardrails, parse_plan, parse_plan_json,
};
pub use prompt::PlannerPromptTemplate;
