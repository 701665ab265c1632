//! Execution plan entities.
//!
//! An [`ExecutionPlan`] is produced once per query by the planner, sanitized
//! by the guardrails, consumed once by the executor, and then discarded.

use crate::agent::{AgentKind, ContextMap, normalize_agent_name};
use crate::mode::OperatingMode;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One proposed unit of work.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanStep {
    /// Agent name as proposed (arbitrary casing/separators).
    pub agent: String,
    /// Instruction forwarded to the agent as its query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    /// Opaque configuration values, passed through untouched.
    #[serde(default)]
    pub parameters: ContextMap,
    /// Agent names that must have completed successfully first.
    #[serde(default)]
    pub depends_on: Vec<String>,
}

impl PlanStep {
    pub fn new(agent: impl Into<String>) -> Self {
        Self {
            agent: agent.into(),
            ..Default::default()
        }
    }

    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.task = Some(task.into());
        self
    }

    pub fn with_dependency(mut self, agent: impl Into<String>) -> Self {
        self.depends_on.push(agent.into());
        self
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }

    /// Known agent this step names, if any.
    pub fn agent_kind(&self) -> Option<AgentKind> {
        AgentKind::resolve(&self.agent)
    }
}

/// Ordered plan of agent steps.
///
/// `steps` are kept in proposal order, which is not guaranteed to respect
/// `depends_on`; the executor gates on dependencies itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionPlan {
    /// Detected mode; `None` for plans produced without mode detection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<OperatingMode>,
    #[serde(default)]
    pub reasoning: String,
    /// Declared agents: the allow-list for this plan.
    #[serde(default)]
    pub agents: Vec<String>,
    #[serde(default, rename = "execution_plan")]
    pub steps: Vec<PlanStep>,
}

impl ExecutionPlan {
    pub fn new(reasoning: impl Into<String>) -> Self {
        Self {
            reasoning: reasoning.into(),
            ..Default::default()
        }
    }

    pub fn with_agent(mut self, agent: impl Into<String>) -> Self {
        self.agents.push(agent.into());
        self
    }

    pub fn with_step(mut self, step: PlanStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn with_mode(mut self, mode: OperatingMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Normalized names of declared agents.
    pub fn allow_set(&self) -> HashSet<String> {
        self.agents.iter().map(|a| normalize_agent_name(a)).collect()
    }

    /// Whether `agent` (any spelling) is declared.
    pub fn declares(&self, agent: &str) -> bool {
        let normalized = normalize_agent_name(agent);
        self.agents
            .iter()
            .any(|a| normalize_agent_name(a) == normalized)
    }
}
