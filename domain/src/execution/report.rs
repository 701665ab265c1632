//! Execution report: what ran, and what was skipped and why.

use crate::agent::AgentResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a plan step did not run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// No registered capability matches the step's agent name.
    UnknownAgent,
    /// The agent is not in the plan's filtered allow-list.
    Disallowed,
    /// Some allow-listed dependencies had not completed successfully.
    UnsatisfiedDependency { missing: Vec<String> },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnknownAgent => write!(f, "unknown agent"),
            SkipReason::Disallowed => write!(f, "not allowed by plan"),
            SkipReason::UnsatisfiedDependency { missing } => {
                write!(f, "missing dependencies: {}", missing.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedStep {
    /// Position of the step in the plan.
    pub index: usize,
    /// Agent name as written in the step.
    pub agent: String,
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// Aggregated outcome of one plan execution.
///
/// `results` holds exactly one entry per step that was invoked, in
/// invocation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub results: Vec<AgentResult>,
    pub skipped: Vec<SkippedStep>,
}

impl ExecutionReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &AgentResult> {
        self.results.iter().filter(|r| r.success)
    }

    pub fn failed(&self) -> impl Iterator<Item = &AgentResult> {
        self.results.iter().filter(|r| !r.success)
    }

    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(|r| r.success)
    }

    pub fn result_for(&self, agent: &str) -> Option<&AgentResult> {
        self.results.iter().rev().find(|r| r.agent_name == agent)
    }
}
