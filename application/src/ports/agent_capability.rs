//! Agent capability port
//!
//! Capability agents are opaque to the orchestrator: it only knows their
//! [`AgentKind`] and that they turn an [`AgentRequest`] into an
//! [`AgentResult`].

use async_trait::async_trait;
use aura_domain::{AgentKind, AgentRequest, AgentResult, normalize_agent_name};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Infrastructure-level failures of a capability.
///
/// Business failures ("no dataset provided") are reported as
/// `Ok(AgentResult::failure(..))` instead.
#[derive(Error, Debug)]
pub enum CapabilityError {
    #[error("Capability unavailable: {0}")]
    Unavailable(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("{0}")]
    Other(String),
}

/// A single capability agent
#[async_trait]
pub trait AgentCapability: Send + Sync {
    /// Which agent this capability implements
    fn kind(&self) -> AgentKind;

    /// Handle one step
    async fn process(&self, request: &AgentRequest) -> Result<AgentResult, CapabilityError>;
}

/// Agent registry: canonical agent identity to capability
///
/// Built fresh for every plan execution.
#[derive(Clone, Default)]
pub struct AgentRegistry {
    agents: HashMap<AgentKind, Arc<dyn AgentCapability>>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a capability under its own kind, replacing any previous one
    pub fn register(&mut self, capability: Arc<dyn AgentCapability>) {
        self.agents.insert(capability.kind(), capability);
    }

    pub fn with(mut self, capability: Arc<dyn AgentCapability>) -> Self {
        self.register(capability);
        self
    }

    /// Resolve a free-form agent name against the registered kinds
    pub fn resolve(&self, name: &str) -> Option<(AgentKind, &Arc<dyn AgentCapability>)> {
        let normalized = normalize_agent_name(name);
        self.agents
            .iter()
            .find(|(kind, _)| kind.normalized() == normalized)
            .map(|(kind, capability)| (*kind, capability))
    }

    pub fn kinds(&self) -> Vec<AgentKind> {
        let mut kinds: Vec<_> = self.agents.keys().copied().collect();
        kinds.sort_by_key(|k| k.as_str());
        kinds
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

impl std::fmt::Debug for AgentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentRegistry")
            .field("agents", &self.kinds())
            .finish()
    }
}

/// Builds the registry for one plan execution
pub trait AgentFactory: Send + Sync {
    fn build_registry(&self) -> AgentRegistry;
}

/// Factory that hands out clones of a prebuilt registry
pub struct StaticAgentFactory {
    registry: AgentRegistry,
}

impl StaticAgentFactory {
    pub fn new(registry: AgentRegistry) -> Self {
        Self { registry }
    }
}

impl AgentFactory for StaticAgentFactory {
    fn build_registry(&self) -> AgentRegistry {
        self.registry.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Echo(AgentKind);

    #[async_trait]
    impl AgentCapability for Echo {
        fn kind(&self) -> AgentKind {
            self.0
        }

        async fn process(&self, request: &AgentRequest) -> Result<AgentResult, CapabilityError> {
            Ok(AgentResult::success("Echo", json!({"query": request.query})))
        }
    }

    #[test]
    fn test_resolve_any_spelling() {
        let registry = AgentRegistry::new()
            .with(Arc::new(Echo(AgentKind::DataHarvester)))
            .with(Arc::new(Echo(AgentKind::Visualizer)));

        for name in ["Data_Harvester", "data harvester", "DATAHARVESTER", "data-harvester"] {
            let (kind, _) = registry.resolve(name).unwrap();
            assert_eq!(kind, AgentKind::DataHarvester);
        }
        assert!(registry.resolve("forecaster").is_none());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_register_replaces_same_kind() {
        let mut registry = AgentRegistry::new();
        registry.register(Arc::new(Echo(AgentKind::Notifier)));
        registry.register(Arc::new(Echo(AgentKind::Notifier)));
        assert_eq!(registry.kinds(), vec![AgentKind::Notifier]);
    }

    #[test]
    fn test_static_factory_clones() {
        let factory = StaticAgentFactory::new(
            AgentRegistry::new().with(Arc::new(Echo(AgentKind::Forecaster))),
        );
        assert_eq!(factory.build_registry().len(), 1);
        assert_eq!(factory.build_registry().len(), 1);
    }
}
