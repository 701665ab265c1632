//! Registry construction from `[agents.*]` configuration.

use super::{HttpAgent, ReasoningAgent};
use crate::config::{AgentBackend, FileAgentsConfig, entry_for};
use aura_application::{AgentFactory, AgentRegistry, ReasoningService};
use aura_domain::AgentKind;
use std::sync::Arc;
use tracing::{debug, warn};

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

/// Builds a fresh [`AgentRegistry`] for every execution.
///
/// Agents without an entry use the reasoning backend with the default
/// model. `backend = "disabled"` leaves the agent unregistered, so plan
/// steps naming it are skipped as unknown.
pub struct ConfiguredAgentFactory {
    reasoning: Arc<dyn ReasoningService>,
    default_model: String,
    agents: FileAgentsConfig,
}

impl ConfiguredAgentFactory {
    pub fn new(
        reasoning: Arc<dyn ReasoningService>,
        default_model: impl Into<String>,
        agents: FileAgentsConfig,
    ) -> Self {
        Self {
            reasoning,
            default_model: default_model.into(),
            agents,
        }
    }
}

impl AgentFactory for ConfiguredAgentFactory {
    fn build_registry(&self) -> AgentRegistry {
        let mut registry = AgentRegistry::new();

        for kind in AgentKind::ALL {
            let entry = entry_for(&self.agents, kind).cloned().unwrap_or_default();

            match entry.backend {
                AgentBackend::Disabled => {
                    debug!("{} disabled by configuration", kind);
                }
                AgentBackend::Http => {
                    let Some(endpoint) = entry.endpoint.as_deref().filter(|e| !e.trim().is_empty())
                    else {
                        warn!("{}: http backend without endpoint, not registered", kind);
                        continue;
                    };
                    let timeout = entry.timeout_seconds.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);
                    match HttpAgent::new(kind, endpoint, timeout) {
                        Ok(agent) => registry.register(Arc::new(agent)),
                        Err(e) => warn!("{}: could not build http client: {}", kind, e),
                    }
                }
                AgentBackend::Reasoning => {
                    let model = entry.model.unwrap_or_else(|| self.default_model.clone());
                    let mut agent = ReasoningAgent::new(kind, self.reasoning.clone(), model);
                    if let Some(temperature) = entry.temperature {
                        agent = agent.with_temperature(temperature);
                    }
                    registry.register(Arc::new(agent));
                }
            }
        }

        debug!("Agent registry built with {} agents", registry.len());
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileAgentEntry;
    use async_trait::async_trait;
    use aura_application::{GenerationRequest, ReasoningError};

    struct Silent;

    #[async_trait]
    impl ReasoningService for Silent {
        async fn generate(&self, _request: &GenerationRequest) -> Result<String, ReasoningError> {
            Ok(String::new())
        }
    }

    #[test]
    fn test_defaults_register_every_agent() {
        let factory = ConfiguredAgentFactory::new(Arc::new(Silent), "gemini-2.0-flash", FileAgentsConfig::new());
        let registry = factory.build_registry();
        assert_eq!(registry.len(), AgentKind::ALL.len());
    }

    #[test]
    fn test_backends_from_config() {
        let mut agents = FileAgentsConfig::new();
        agents.insert(
            "Notifier".to_string(),
            FileAgentEntry {
                backend: AgentBackend::Disabled,
                ..Default::default()
            },
        );
        agents.insert(
            "forecaster".to_string(),
            FileAgentEntry {
                backend: AgentBackend::Http,
                endpoint: Some("http://localhost:9000/forecast".to_string()),
                ..Default::default()
            },
        );
        agents.insert(
            "visualizer".to_string(),
            FileAgentEntry {
                backend: AgentBackend::Http,
                ..Default::default()
            },
        );

        let registry = ConfiguredAgentFactory::new(Arc::new(Silent), "m", agents).build_registry();
        assert_eq!(registry.len(), AgentKind::ALL.len() - 2);
        assert!(registry.resolve("notifier").is_none());
        assert!(registry.resolve("visualizer").is_none());
        assert!(registry.resolve("forecaster").is_some());
    }
}
