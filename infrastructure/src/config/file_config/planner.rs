//! Planner configuration from TOML (`[planner]` and `[mode]` sections)

use aura_application::{OrchestratorSettings, PlanningStrategy};
use aura_domain::{ConfigIssue, ConfigIssueCode, ModeDetector};
use serde::{Deserialize, Serialize};

/// Raw planner configuration from TOML
///
/// # Example
///
/// ```toml
/// [planner]
/// model = "gemini-2.0-flash"
/// temperature = 0.1
/// max_output_tokens = 2000
/// strategy = "guarded"   # or "open"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePlannerConfig {
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub strategy: String,
}

impl Default for FilePlannerConfig {
    fn default() -> Self {
        let settings = OrchestratorSettings::default();
        Self {
            model: settings.planner_model,
            temperature: settings.temperature,
            max_output_tokens: settings.max_output_tokens,
            strategy: settings.strategy.to_string(),
        }
    }
}

impl FilePlannerConfig {
    /// Parse the strategy, falling back to `guarded` with a warning.
    pub fn parse_strategy(&self) -> (PlanningStrategy, Vec<ConfigIssue>) {
        match self.strategy.parse::<PlanningStrategy>() {
            Ok(strategy) => (strategy, vec![]),
            Err(_) => (
                PlanningStrategy::default(),
                vec![ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "planner.strategy".to_string(),
                        value: self.strategy.clone(),
                        valid_values: vec!["guarded".to_string(), "open".to_string()],
                    },
                    format!(
                        "planner.strategy: unknown value '{}', falling back to 'guarded'",
                        self.strategy
                    ),
                )],
            ),
        }
    }

    pub fn model_issues(&self) -> Vec<ConfigIssue> {
        if self.model.trim().is_empty() {
            vec![ConfigIssue::error(
                ConfigIssueCode::EmptyModelName {
                    field: "planner.model".to_string(),
                },
                "planner.model must not be empty",
            )]
        } else {
            vec![]
        }
    }
}

/// Raw mode detection keywords from TOML
///
/// Omitted lists keep the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModeConfig {
    pub deep_keywords: Option<Vec<String>>,
    pub order_keywords: Option<Vec<String>>,
}

impl FileModeConfig {
    pub fn to_detector(&self) -> ModeDetector {
        let mut detector = ModeDetector::default();
        if let Some(keywords) = &self.deep_keywords {
            detector = detector.with_deep_keywords(keywords.clone());
        }
        if let Some(keywords) = &self.order_keywords {
            detector = detector.with_order_keywords(keywords.clone());
        }
        detector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_settings() {
        let config = FilePlannerConfig::default();
        assert_eq!(config.temperature, 0.1);
        assert_eq!(config.max_output_tokens, 2000);
        let (strategy, issues) = config.parse_strategy();
        assert_eq!(strategy, PlanningStrategy::Guarded);
        assert!(issues.is_empty());
        assert!(config.model_issues().is_empty());
    }

    #[test]
    fn test_unknown_strategy_warns() {
        let config = FilePlannerConfig {
            strategy: "yolo".to_string(),
            ..Default::default()
        };
        let (strategy, issues) = config.parse_strategy();
        assert_eq!(strategy, PlanningStrategy::Guarded);
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
    }

    #[test]
    fn test_mode_keywords_override() {
        let config = FileModeConfig {
            deep_keywords: Some(vec!["analyse".to_string()]),
            order_keywords: None,
        };
        let detector = config.to_detector();
        assert_eq!(detector.deep_keywords, vec!["analyse"]);
        assert!(detector.order_keywords.contains(&"procure".to_string()));
    }
}
