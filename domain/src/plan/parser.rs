//! Plan parsing from reasoning-service responses.
//!
//! Models often wrap their JSON in a fenced block (` ```json ` or plain
//! ` ``` `) or surround it with prose. [`parse_plan`] strips that formatting
//! and extracts an [`ExecutionPlan`]; it never retries and never guesses a
//! plan out of malformed JSON.

use super::entities::{ExecutionPlan, PlanStep};
use crate::mode::OperatingMode;
use serde_json::Value;
use thiserror::Error;

/// Reasons a response could not become a plan.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("invalid_plan: {0}")]
    InvalidPlan(String),

    #[error("no_agents_selected")]
    NoAgentsSelected,
}

impl PlanError {
    /// Stable machine-readable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            PlanError::InvalidPlan(_) => "invalid_plan",
            PlanError::NoAgentsSelected => "no_agents_selected",
        }
    }
}

/// Strip a surrounding code fence, if any.
///
/// Returns the body of the first fenced block (with or without a language
/// tag). Text without a fence is returned trimmed. An unterminated fence
/// yields everything after the opening line.
pub fn strip_code_fence(text: &str) -> &str {
    let Some(open) = text.find("```") else {
        return text.trim();
    };

    let after_ticks = &text[open + 3..];
    // Skip the language tag (rest of the opening line)
    let body_start = after_ticks.find('\n').map(|i| i + 1).unwrap_or(after_ticks.len());
    let tag = after_ticks[..body_start].trim();
    let body = if tag.is_empty() || tag.chars().all(|c| c.is_ascii_alphanumeric()) {
        &after_ticks[body_start..]
    } else {
        // ```{"agents": ...}``` on a single line
        after_ticks
    };

    match body.find("```") {
        Some(close) => body[..close].trim(),
        None => body.trim(),
    }
}

/// Parse a plan from raw model output.
///
/// 1. Strip code fences
/// 2. Parse JSON, falling back to the outermost `{ ... }` span when prose surrounds it
/// 3. Validate shape and reject an empty `agents` list
pub fn parse_plan(response: &str) -> Result<ExecutionPlan, PlanError> {
    let body = strip_code_fence(response);

    let json = match serde_json::from_str::<Value>(body) {
        Ok(value) => value,
        Err(first_err) => match outer_object(body) {
            Some(candidate) => serde_json::from_str::<Value>(candidate)
                .map_err(|e| PlanError::InvalidPlan(e.to_string()))?,
            None => return Err(PlanError::InvalidPlan(first_err.to_string())),
        },
    };

    parse_plan_json(&json)
}

fn outer_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Stringify ids that may arrive as numbers; null and empty become `None`.
fn json_value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse a plan from an already-decoded JSON value.
///
/// Expected schema:
/// ```json
/// {
///   "mode": "cold_start | deep_dive | ad_hoc",
///   "reasoning": "string",
///   "agents": ["agent_name", ...],
///   "execution_plan": [
///     {"agent": "agent_name", "task": "string", "parameters": {}, "depends_on": ["agent_name"]}
///   ]
/// }
/// ```
///
/// `mode` is advisory and silently dropped when unrecognized. Steps without
/// an agent name are dropped.
pub fn parse_plan_json(json: &Value) -> Result<ExecutionPlan, PlanError> {
    let object = json
        .as_object()
        .ok_or_else(|| PlanError::InvalidPlan("plan is not a JSON object".to_string()))?;

    let agents: Vec<String> = object
        .get("agents")
        .and_then(Value::as_array)
        .map(|list| list.iter().filter_map(json_value_to_string).collect())
        .unwrap_or_default();

    if agents.is_empty() {
        return Err(PlanError::NoAgentsSelected);
    }

    let mut plan = ExecutionPlan::new(
        object
            .get("reasoning")
            .and_then(Value::as_str)
            .unwrap_or(""),
    );
    plan.agents = agents;
    plan.mode = object
        .get("mode")
        .and_then(Value::as_str)
        .and_then(|m| m.parse::<OperatingMode>().ok());

    if let Some(steps) = object.get("execution_plan").and_then(Value::as_array) {
        for step_json in steps {
            let Some(agent) = step_json.get("agent").and_then(json_value_to_string) else {
                continue;
            };

            let mut step = PlanStep::new(agent);

            if let Some(task) = step_json.get("task").and_then(Value::as_str)
                && !task.trim().is_empty()
            {
                step = step.with_task(task);
            }

            if let Some(params) = step_json.get("parameters").and_then(Value::as_object) {
                step.parameters = params.clone();
            }

            if let Some(deps) = step_json.get("depends_on").and_then(Value::as_array) {
                step.depends_on = deps.iter().filter_map(json_value_to_string).collect();
            }

            plan.steps.push(step);
        }
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PLAN_JSON: &str = r#"{
  "mode": "deep_dive",
  "reasoning": "Full pipeline",
  "agents": ["data_harvester", "trend_analyst"],
  "execution_plan": [
    {"agent": "data_harvester", "task": "Clean the data", "parameters": {}, "depends_on": []},
    {"agent": "Trend Analyst", "task": "Find trends", "parameters": {"window": 7}, "depends_on": ["data_harvester"]}
  ]
}"#;

    #[test]
    fn test_parse_raw_json() {
        let plan = parse_plan(PLAN_JSON).unwrap();
        assert_eq!(plan.mode, Some(OperatingMode::DeepDive));
        assert_eq!(plan.reasoning, "Full pipeline");
        assert_eq!(plan.agents, vec!["data_harvester", "trend_analyst"]);
        assert_eq!(plan.steps.len(), 2);
        assert_eq!(plan.steps[1].agent, "Trend Analyst");
        assert_eq!(plan.steps[1].parameters["window"], 7);
        assert_eq!(plan.steps[1].depends_on, vec!["data_harvester"]);
    }

    #[test]
    fn test_parse_json_fence() {
        let response = format!("Here is the plan:\n```json\n{}\n```\nGood luck!", PLAN_JSON);
        let plan = parse_plan(&response).unwrap();
        assert_eq!(plan.steps.len(), 2);
    }

    #[test]
    fn test_parse_bare_fence() {
        let response = format!("```\n{}\n```", PLAN_JSON);
        assert_eq!(parse_plan(&response).unwrap().agents.len(), 2);
    }

    #[test]
    fn test_parse_prose_wrapped_json() {
        let response = format!("Sure! {} Let me know.", PLAN_JSON);
        assert_eq!(parse_plan(&response).unwrap().agents.len(), 2);
    }

    #[test]
    fn test_truncated_json_is_invalid() {
        let response = r#"```json
{"reasoning": "x", "agents": ["trend_analyst"], "execution_plan": [{"agent": "trend_analyst""#;
        let err = parse_plan(response).unwrap_err();
        assert_eq!(err.code(), "invalid_plan");
    }

    #[test]
    fn test_plain_text_is_invalid() {
        let err = parse_plan("Analysis temporarily unavailable due to API constraints.")
            .unwrap_err();
        assert!(matches!(err, PlanError::InvalidPlan(_)));
    }

    #[test]
    fn test_empty_agents_rejected() {
        let err = parse_plan(r#"{"reasoning": "nothing to do", "agents": [], "execution_plan": []}"#)
            .unwrap_err();
        assert_eq!(err, PlanError::NoAgentsSelected);
        assert_eq!(err.to_string(), "no_agents_selected");
    }

    #[test]
    fn test_missing_agents_rejected() {
        let err = parse_plan(r#"{"reasoning": "hm"}"#).unwrap_err();
        assert_eq!(err, PlanError::NoAgentsSelected);
    }

    #[test]
    fn test_non_object_is_invalid() {
        let err = parse_plan(r#"["trend_analyst"]"#).unwrap_err();
        assert_eq!(err.code(), "invalid_plan");
    }

    #[test]
    fn test_unknown_mode_is_dropped() {
        let json = json!({
            "mode": "cold_start | deep_dive | ad_hoc",
            "agents": ["visualizer"],
            "execution_plan": [{"agent": "visualizer"}]
        });
        let plan = parse_plan_json(&json).unwrap();
        assert_eq!(plan.mode, None);
        assert_eq!(plan.steps[0].task, None);
        assert!(plan.steps[0].parameters.is_empty());
    }

    #[test]
    fn test_steps_without_agent_are_dropped() {
        let json = json!({
            "agents": ["visualizer"],
            "execution_plan": [{"task": "orphan"}, {"agent": "visualizer", "task": "chart"}]
        });
        let plan = parse_plan_json(&json).unwrap();
        assert_eq!(plan.steps.len(), 1);
        assert_eq!(plan.steps[0].task.as_deref(), Some("chart"));
    }

    #[test]
    fn test_strip_code_fence_variants() {
        assert_eq!(strip_code_fence("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("  {}  "), "{}");
        assert_eq!(strip_code_fence("```json\n{\"a\": 1}"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("```{\"a\": 1}```"), "{\"a\": 1}");
    }
}
