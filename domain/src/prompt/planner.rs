//! Prompt templates for plan generation

use crate::agent::AgentKind;
use crate::dataset::DatasetSummary;
use crate::mode::OperatingMode;

/// Templates for the planner's single reasoning call
pub struct PlannerPromptTemplate;

const PLAN_SCHEMA: &str = r#"Respond in JSON:
{
    "mode": "cold_start | deep_dive | ad_hoc",
    "reasoning": "Why you chose this mode and agents",
    "agents": ["list", "of", "agent_names"],
    "execution_plan": [
        {
            "agent": "agent_name",
            "task": "Specific instruction for this agent",
            "parameters": {},
            "depends_on": ["previous_agent_name"]
        }
    ]
}"#;

impl PlannerPromptTemplate {
    /// Capability table, one `- name: description` line per agent.
    pub fn capability_table(agents: &[AgentKind]) -> String {
        agents
            .iter()
            .map(|a| format!("- {}: {}", a, a.capability()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Mode-constrained planning prompt.
    ///
    /// The model sees every agent but is told which ones the detected mode
    /// allows; its choices are filtered afterwards regardless.
    pub fn guarded(query: &str, mode: OperatingMode, has_dataset: bool) -> String {
        let capabilities = Self::capability_table(&AgentKind::ALL);
        let modes = OperatingMode::ALL
            .iter()
            .map(|m| m.guidance())
            .collect::<Vec<_>>()
            .join("\n\n");
        let allowed = mode
            .allowed_agents()
            .iter()
            .map(AgentKind::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            r#"You are the orchestrator for a supply chain analytics platform.

Your role:
1. Respect the detected operating mode.
2. Create an execution plan.
3. Strictly follow the agent constraints.

## Available Agents

{capabilities}

## Operating Modes

{modes}

## Critical Rules

1. **notifier**: never include it unless `order_manager` is also included.
2. **data_harvester**: in deep_dive it is always the first step; in ad_hoc skip it.
3. **Dependencies**: never list an agent in `depends_on` unless it is also in `agents`.
   If `data_harvester` is skipped, the first agent must have `depends_on: []`.

{schema}

## Current Context

- Detected Mode: {mode_upper}
- Allowed Agents: {allowed}
- Has Dataset: {has_dataset}
- User Query: {query}

Generate the execution plan based on the Detected Mode constraints."#,
            capabilities = capabilities,
            modes = modes,
            schema = PLAN_SCHEMA,
            mode_upper = mode.as_str().to_uppercase(),
            allowed = allowed,
            has_dataset = if has_dataset { "Yes" } else { "No" },
            query = query,
        )
    }

    /// Unconstrained planning prompt.
    ///
    /// No mode is given; the model picks agents from the capability table
    /// and a compact dataset summary.
    pub fn open(query: &str, dataset: Option<&DatasetSummary>) -> String {
        let capabilities = Self::capability_table(&AgentKind::ALL);
        let dataset_info = dataset
            .map(DatasetSummary::to_prompt_text)
            .unwrap_or_else(|| "No dataset attached.\n".to_string());

        format!(
            r#"You are the orchestrator for a supply chain analytics platform.
Select the agents needed to answer the user's request and order them.

## Available Agents

{capabilities}

## Rules

1. Only include agents that are needed.
2. Never include `notifier` unless `order_manager` is also included.
3. Never list an agent in `depends_on` unless it is also in `agents`.

## Dataset

{dataset_info}
{schema}

## User Query

{query}"#,
            capabilities = capabilities,
            dataset_info = dataset_info,
            schema = PLAN_SCHEMA,
            query = query,
        )
    }
}
