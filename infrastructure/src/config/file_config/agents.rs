//! Capability agent configuration from TOML (`[agents.<name>]` tables)

use aura_domain::{AgentKind, ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a capability agent is backed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentBackend {
    /// Answered by the reasoning service with a role prompt
    #[default]
    Reasoning,
    /// Forwarded to an HTTP endpoint
    Http,
    /// Not registered; steps naming it are skipped
    Disabled,
}

/// One `[agents.<name>]` table
///
/// # Example
///
/// ```toml
/// [agents.forecaster]
/// backend = "http"
/// endpoint = "http://localhost:8080/agents/forecaster"
///
/// [agents.notifier]
/// backend = "disabled"
///
/// [agents.trend_analyst]
/// model = "gemini-1.5-pro"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentEntry {
    pub backend: AgentBackend,
    /// Model for the reasoning backend (defaults to the planner model)
    pub model: Option<String>,
    /// URL for the http backend
    pub endpoint: Option<String>,
    pub temperature: Option<f32>,
    pub timeout_seconds: Option<u64>,
}

/// All `[agents.*]` tables, keyed by the name as written
pub type FileAgentsConfig = BTreeMap<String, FileAgentEntry>;

/// Look up the entry for a kind, accepting any spelling of its name.
pub fn entry_for<'a>(agents: &'a FileAgentsConfig, kind: AgentKind) -> Option<&'a FileAgentEntry> {
    agents
        .iter()
        .find(|(name, _)| AgentKind::resolve(name) == Some(kind))
        .map(|(_, entry)| entry)
}

/// Issues in the `[agents.*]` tables.
pub fn validate_agents(agents: &FileAgentsConfig) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();

    for (name, entry) in agents {
        if AgentKind::resolve(name).is_none() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::UnknownAgent { name: name.clone() },
                format!("[agents.{}]: no such agent, entry ignored", name),
            ));
        }

        if entry.backend == AgentBackend::Http
            && entry.endpoint.as_deref().is_none_or(|e| e.trim().is_empty())
        {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::MissingField {
                    field: format!("agents.{}.endpoint", name),
                },
                format!("[agents.{}]: backend = \"http\" requires an endpoint", name),
            ));
        }

        if let Some(model) = &entry.model
            && model.trim().is_empty()
        {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyModelName {
                    field: format!("agents.{}.model", name),
                },
                format!("[agents.{}]: model must not be empty", name),
            ));
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_str: &str) -> FileAgentsConfig {
        #[derive(Deserialize)]
        struct Wrapper {
            agents: FileAgentsConfig,
        }
        toml::from_str::<Wrapper>(toml_str).unwrap().agents
    }

    #[test]
    fn test_deserialize_backends() {
        let agents = parse(
            r#"
[agents.forecaster]
backend = "http"
endpoint = "http://localhost:9000/forecast"

[agents."Order Manager"]
backend = "disabled"

[agents.trend_analyst]
model = "gemini-1.5-pro"
"#,
        );

        let forecaster = entry_for(&agents, AgentKind::Forecaster).unwrap();
        assert_eq!(forecaster.backend, AgentBackend::Http);
        assert_eq!(
            entry_for(&agents, AgentKind::OrderManager).unwrap().backend,
            AgentBackend::Disabled
        );
        let trend = entry_for(&agents, AgentKind::TrendAnalyst).unwrap();
        assert_eq!(trend.backend, AgentBackend::Reasoning);
        assert_eq!(trend.model.as_deref(), Some("gemini-1.5-pro"));
        assert!(entry_for(&agents, AgentKind::Notifier).is_none());
        assert!(validate_agents(&agents).is_empty());
    }

    #[test]
    fn test_validate_agents() {
        let agents = parse(
            r#"
[agents.sentiment]
model = "x"

[agents.visualizer]
backend = "http"
"#,
        );
        let issues = validate_agents(&agents);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().any(|i| matches!(i.code, ConfigIssueCode::UnknownAgent { .. })));
        assert!(issues.iter().any(|i| i.is_error()));
    }
}
