//! Agent request and result value objects.
//!
//! Every capability, whatever it does internally, receives an
//! [`AgentRequest`] and answers with an [`AgentResult`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Structured key/value context shared between the caller and agents.
pub type ContextMap = Map<String, Value>;

/// Input handed to a capability for a single plan step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentRequest {
    /// Natural-language instruction (the step task, or the user query).
    pub query: String,
    /// Shared context, enriched with upstream `{agent}_output` entries.
    #[serde(default)]
    pub context: ContextMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Step-specific parameters, passed through untouched.
    #[serde(default)]
    pub parameters: ContextMap,
}

impl AgentRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn with_context(mut self, context: ContextMap) -> Self {
        self.context = context;
        self
    }

    pub fn with_parameters(mut self, parameters: ContextMap) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_session(mut self, session_id: Option<String>, user_id: Option<String>) -> Self {
        self.session_id = session_id;
        self.user_id = user_id;
        self
    }

    /// Convenience accessor for an integer parameter.
    pub fn parameter_i64(&self, key: &str) -> Option<i64> {
        self.parameters.get(key).and_then(Value::as_i64)
    }
}

/// Outcome of one agent invocation.
///
/// `data` is present iff `success`; `error` is present iff not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResult {
    /// Canonical agent identity (overwritten by the executor).
    pub agent_name: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: ContextMap,
    /// RFC 3339 completion time, stamped by the executor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl AgentResult {
    pub fn success(agent_name: impl Into<String>, data: Value) -> Self {
        Self {
            agent_name: agent_name.into(),
            success: true,
            data: Some(data),
            error: None,
            metadata: Map::new(),
            timestamp: None,
        }
    }

    pub fn failure(agent_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
            success: false,
            data: None,
            error: Some(error.into()),
            metadata: Map::new(),
            timestamp: None,
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Human-readable one-line summary (`agent: data` or `agent: error`).
    pub fn summary_line(&self) -> String {
        match (&self.data, &self.error) {
            (Some(data), _) if self.success => format!("{}: {}", self.agent_name, data),
            (_, Some(error)) => format!("{}: {}", self.agent_name, error),
            _ => format!("{}: (no output)", self.agent_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_and_failure_shapes() {
        let ok = AgentResult::success("forecaster", json!({"periods": 30}));
        assert!(ok.is_success());
        assert!(ok.error.is_none());
        assert_eq!(ok.data, Some(json!({"periods": 30})));

        let err = AgentResult::failure("forecaster", "No dataset provided in context");
        assert!(!err.is_success());
        assert!(err.data.is_none());
        assert_eq!(err.error.as_deref(), Some("No dataset provided in context"));
    }

    #[test]
    fn test_failure_serialization_omits_data() {
        let err = AgentResult::failure("notifier", "boom");
        let value = serde_json::to_value(&err).unwrap();
        assert!(value.get("data").is_none());
        assert!(value.get("metadata").is_none());
        assert_eq!(value["error"], "boom");
    }

    #[test]
    fn test_summary_line() {
        let ok = AgentResult::success("visualizer", json!("chart"));
        assert_eq!(ok.summary_line(), "visualizer: \"chart\"");
        let err = AgentResult::failure("visualizer", "no columns");
        assert_eq!(err.summary_line(), "visualizer: no columns");
    }

    #[test]
    fn test_request_parameter_lookup() {
        let mut params = ContextMap::new();
        params.insert("periods".to_string(), json!(14));
        let request = AgentRequest::new("forecast demand").with_parameters(params);
        assert_eq!(request.parameter_i64("periods"), Some(14));
        assert_eq!(request.parameter_i64("missing"), None);
    }
}
