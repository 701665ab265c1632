//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod agents;
mod output;
mod planner;
mod reasoning;

pub use agents::{AgentBackend, FileAgentEntry, FileAgentsConfig, entry_for, validate_agents};
pub use output::{FileJournalConfig, FileOutputConfig};
pub use planner::{FileModeConfig, FilePlannerConfig};
pub use reasoning::{DEFAULT_GEMINI_ENDPOINT, FileReasoningConfig};

use aura_application::OrchestratorSettings;
use aura_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Reasoning service (Gemini) connection
    pub reasoning: FileReasoningConfig,
    /// Planner model and strategy
    pub planner: FilePlannerConfig,
    /// Mode detection keywords
    pub mode: FileModeConfig,
    /// Per-agent backends
    pub agents: FileAgentsConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Run journal settings
    pub journal: FileJournalConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks:
    /// 1. Empty model names
    /// 2. Unknown planning strategy
    /// 3. `[agents.*]` tables: unknown names, http backends without endpoint
    /// 4. Zero request timeout
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.planner.model_issues());
        issues.extend(self.planner.parse_strategy().1);
        issues.extend(validate_agents(&self.agents));

        if self.reasoning.timeout_seconds == 0 {
            issues.push(ConfigIssue::error(
                aura_domain::ConfigIssueCode::InvalidEnumValue {
                    field: "reasoning.timeout_seconds".to_string(),
                    value: "0".to_string(),
                    valid_values: vec!["> 0".to_string()],
                },
                "reasoning.timeout_seconds cannot be 0",
            ));
        }

        issues
    }

    /// Build the orchestrator settings from `[planner]` and `[mode]`.
    pub fn orchestrator_settings(&self) -> OrchestratorSettings {
        OrchestratorSettings::default()
            .with_planner_model(&self.planner.model)
            .with_temperature(self.planner.temperature)
            .with_max_output_tokens(self.planner.max_output_tokens)
            .with_strategy(self.planner.parse_strategy().0)
            .with_mode_detector(self.mode.to_detector())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aura_application::PlanningStrategy;
    use aura_domain::OutputFormat;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[reasoning]
api_key_env = "GEMINI_KEY"
timeout_seconds = 30

[planner]
model = "gemini-1.5-pro"
strategy = "open"

[mode]
deep_keywords = ["analyse", "forecast"]

[agents.notifier]
backend = "disabled"

[output]
format = "full"
color = false

[journal]
path = "runs.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.reasoning.api_key_env, "GEMINI_KEY");
        assert_eq!(config.reasoning.timeout_seconds, 30);
        assert_eq!(config.planner.model, "gemini-1.5-pro");
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert!(!config.output.color);
        assert_eq!(config.agents["notifier"].backend, AgentBackend::Disabled);
        assert!(config.validate().is_empty());

        let settings = config.orchestrator_settings();
        assert_eq!(settings.strategy, PlanningStrategy::Open);
        assert_eq!(settings.planner_model, "gemini-1.5-pro");
        assert_eq!(settings.mode_detector.deep_keywords, vec!["analyse", "forecast"]);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[planner]
temperature = 0.3
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.planner.temperature, 0.3);
        // Defaults should apply
        assert_eq!(config.planner.max_output_tokens, 2000);
        assert_eq!(config.reasoning.base_url, DEFAULT_GEMINI_ENDPOINT);
        assert!(config.agents.is_empty());
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_all_issues() {
        let toml_str = r#"
[reasoning]
timeout_seconds = 0

[planner]
model = ""
strategy = "wild"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 3);
        assert_eq!(issues.iter().filter(|i| i.is_error()).count(), 2);
    }
}
