//! Per-run execution context.
//!
//! Owned by the executor for the duration of one plan run. The shared map
//! only grows: each successful step writes `{agent}_output`, and a re-run of
//! the same agent overwrites its entry.

use crate::agent::{AgentKind, ContextMap};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionContext {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    shared: ContextMap,
}

impl ExecutionContext {
    pub fn new(query: impl Into<String>, shared: ContextMap) -> Self {
        Self {
            query: query.into(),
            session_id: None,
            user_id: None,
            shared,
        }
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn shared(&self) -> &ContextMap {
        &self.shared
    }

    pub fn output_of(&self, agent: AgentKind) -> Option<&Value> {
        self.shared.get(&agent.output_key())
    }

    /// Store a successful step's data under `{agent}_output`.
    pub fn record_output(&mut self, agent: AgentKind, data: Value) {
        self.shared.insert(agent.output_key(), data);
    }

    /// Context handed to a step.
    ///
    /// The shared map already holds the caller's keys (dataset included) and
    /// every `{agent}_output` written so far, so a snapshot of it carries the
    /// outputs of all completed dependencies. Outputs of earlier steps that
    /// are not dependencies stay visible too.
    pub fn step_context(&self) -> ContextMap {
        self.shared.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_output_uses_canonical_key() {
        let mut ctx = ExecutionContext::new("q", ContextMap::new());
        ctx.record_output(AgentKind::TrendAnalyst, json!({"trend": "up"}));
        assert_eq!(ctx.shared()["trend_analyst_output"], json!({"trend": "up"}));
        assert_eq!(ctx.output_of(AgentKind::TrendAnalyst), Some(&json!({"trend": "up"})));
    }

    #[test]
    fn test_rerun_overwrites_output() {
        let mut ctx = ExecutionContext::new("q", ContextMap::new());
        ctx.record_output(AgentKind::Visualizer, json!(1));
        ctx.record_output(AgentKind::Visualizer, json!(2));
        assert_eq!(ctx.output_of(AgentKind::Visualizer), Some(&json!(2)));
        assert_eq!(ctx.shared().len(), 1);
    }

    #[test]
    fn test_step_context_keeps_dataset_and_outputs() {
        let mut shared = ContextMap::new();
        shared.insert("dataset".to_string(), json!([{"sales": 10}]));
        shared.insert("dataset_id".to_string(), json!("march"));
        let mut ctx = ExecutionContext::new("q", shared);
        ctx.record_output(AgentKind::DataHarvester, json!({"rows": 1}));
        ctx.record_output(AgentKind::TrendAnalyst, json!({"trend": "up"}));

        let step = ctx.step_context();
        assert_eq!(step["dataset"], json!([{"sales": 10}]));
        assert_eq!(step["dataset_id"], "march");
        assert_eq!(step["data_harvester_output"], json!({"rows": 1}));
        assert_eq!(step["trend_analyst_output"], json!({"trend": "up"}));
    }

    #[test]
    fn test_step_context_does_not_mutate_shared() {
        let ctx = ExecutionContext::new("q", ContextMap::new());
        let mut step = ctx.step_context();
        step.insert("scratch".to_string(), json!(true));
        assert!(ctx.shared().is_empty());
    }
}
