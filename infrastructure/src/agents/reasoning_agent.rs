//! LLM-backed capability agent.
//!
//! Any [`AgentKind`] can be answered by prompting the reasoning service
//! with the agent's role, its task, and a compact view of what upstream
//! agents produced.

use async_trait::async_trait;
use aura_application::{
    AgentCapability, CapabilityError, GenerationRequest, ReasoningService,
};
use aura_domain::plan::strip_code_fence;
use aura_domain::{
    AgentKind, AgentRequest, AgentResult, ContextMap, DATASET_KEY, DatasetSummary, truncate,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::debug;

/// Max bytes of each upstream output quoted in the prompt
const UPSTREAM_PREVIEW_BYTES: usize = 1500;

pub struct ReasoningAgent {
    kind: AgentKind,
    reasoning: Arc<dyn ReasoningService>,
    model: String,
    temperature: f32,
}

impl ReasoningAgent {
    pub fn new(kind: AgentKind, reasoning: Arc<dyn ReasoningService>, model: impl Into<String>) -> Self {
        Self {
            kind,
            reasoning,
            model: model.into(),
            temperature: 0.7,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn build_prompt(&self, request: &AgentRequest) -> String {
        let mut prompt = format!(
            "You are the {} agent of a supply chain analytics platform.\nRole: {}\n\n## Task\n\n{}\n",
            self.kind,
            self.kind.capability(),
            request.query
        );

        if !request.parameters.is_empty() {
            prompt.push_str("\n## Parameters\n\n");
            prompt.push_str(&Value::Object(request.parameters.clone()).to_string());
            prompt.push('\n');
        }

        if let Some(summary) = DatasetSummary::from_context(&request.context) {
            prompt.push_str("\n## Dataset\n\n");
            prompt.push_str(&summary.to_prompt_text());
        }

        let upstream = upstream_outputs(&request.context);
        if !upstream.is_empty() {
            prompt.push_str("\n## Upstream Results\n\n");
            for (key, value) in upstream {
                prompt.push_str(&format!(
                    "- {}: {}\n",
                    key,
                    truncate(&value.to_string(), UPSTREAM_PREVIEW_BYTES)
                ));
            }
        }

        prompt.push_str("\nRespond with concise, actionable insights. Use JSON when the answer is structured.");
        prompt
    }
}

/// `{agent}_output` entries, in key order.
fn upstream_outputs(context: &ContextMap) -> Vec<(&String, &Value)> {
    let mut outputs: Vec<_> = context
        .iter()
        .filter(|(key, _)| key.ends_with("_output"))
        .collect();
    outputs.sort_by(|a, b| a.0.cmp(b.0));
    outputs
}

/// Parse the model's answer as JSON when possible, otherwise keep the text.
fn interpret(text: &str) -> Value {
    serde_json::from_str(strip_code_fence(text)).unwrap_or_else(|_| Value::String(text.trim().to_string()))
}

#[async_trait]
impl AgentCapability for ReasoningAgent {
    fn kind(&self) -> AgentKind {
        self.kind
    }

    async fn process(&self, request: &AgentRequest) -> Result<AgentResult, CapabilityError> {
        if self.kind.requires_dataset() && !request.context.contains_key(DATASET_KEY) {
            return Ok(AgentResult::failure(
                self.kind.as_str(),
                "No dataset provided in context",
            ));
        }

        let prompt = self.build_prompt(request);
        debug!("{} prompt: {} chars", self.kind, prompt.len());

        let generation = GenerationRequest::new(&self.model, prompt).with_temperature(self.temperature);
        let text = self
            .reasoning
            .generate(&generation)
            .await
            .map_err(|e| CapabilityError::Transport(e.to_string()))?;

        Ok(
            AgentResult::success(self.kind.as_str(), json!({ "insights": interpret(&text) }))
                .with_metadata("model", Value::String(self.model.clone())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aura_application::ReasoningError;
    use std::sync::Mutex;

    struct Recording {
        reply: Result<String, ()>,
        prompts: Mutex<Vec<String>>,
    }

    impl Recording {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ReasoningService for Recording {
        async fn generate(&self, request: &GenerationRequest) -> Result<String, ReasoningError> {
            self.prompts.lock().unwrap().push(request.prompt.clone());
            self.reply
                .clone()
                .map_err(|_| ReasoningError::ConnectionError("refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_json_answer_is_structured() {
        let reasoning = Recording::replying("```json\n{\"direction\": \"up\"}\n```");
        let agent = ReasoningAgent::new(AgentKind::TrendAnalyst, reasoning.clone(), "gemini-2.0-flash");

        let mut context = ContextMap::new();
        context.insert("data_harvester_output".to_string(), json!({"rows": 12}));
        let request = AgentRequest::new("find trends").with_context(context);

        let result = agent.process(&request).await.unwrap();
        assert!(result.success);
        assert_eq!(result.data.unwrap()["insights"]["direction"], "up");
        assert_eq!(result.metadata["model"], "gemini-2.0-flash");

        let prompts = reasoning.prompts.lock().unwrap();
        assert!(prompts[0].contains("Role: Identifies trends"));
        assert!(prompts[0].contains("- data_harvester_output: {\"rows\":12}"));
    }

    #[tokio::test]
    async fn test_text_answer_kept_raw() {
        let reasoning = Recording::replying("  Demand is flat.\n");
        let agent = ReasoningAgent::new(AgentKind::Visualizer, reasoning, "m");
        let result = agent.process(&AgentRequest::new("chart it")).await.unwrap();
        assert_eq!(result.data.unwrap()["insights"], "Demand is flat.");
    }

    #[tokio::test]
    async fn test_dataset_required() {
        let reasoning = Recording::replying("{}");
        let agent = ReasoningAgent::new(AgentKind::Forecaster, reasoning.clone(), "m");
        let result = agent.process(&AgentRequest::new("forecast")).await.unwrap();
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("No dataset provided in context"));
        assert!(reasoning.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_transport_error() {
        let reasoning = Arc::new(Recording {
            reply: Err(()),
            prompts: Mutex::new(Vec::new()),
        });
        let agent = ReasoningAgent::new(AgentKind::Notifier, reasoning, "m");
        let err = agent.process(&AgentRequest::new("alert")).await.unwrap_err();
        assert!(matches!(err, CapabilityError::Transport(_)));
    }
}
