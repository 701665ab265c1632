//! Reasoning service configuration from TOML (`[reasoning]` section)

use serde::{Deserialize, Serialize};

pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Raw reasoning service configuration from TOML
///
/// # Example
///
/// ```toml
/// [reasoning]
/// base_url = "https://generativelanguage.googleapis.com/v1beta"
/// api_key_env = "GOOGLE_API_KEY"
/// timeout_seconds = 60
/// fallback = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReasoningConfig {
    /// Gemini API base URL
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Inline API key (takes precedence over `api_key_env`)
    pub api_key: Option<String>,
    /// Per-request HTTP timeout
    pub timeout_seconds: u64,
    /// Replace provider errors with a degraded placeholder text
    pub fallback: bool,
}

impl Default for FileReasoningConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEMINI_ENDPOINT.to_string(),
            api_key_env: "GOOGLE_API_KEY".to_string(),
            api_key: None,
            timeout_seconds: 60,
            fallback: true,
        }
    }
}

impl FileReasoningConfig {
    /// Resolve the API key: inline value first, then the environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|k| !k.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_key_wins() {
        let config = FileReasoningConfig {
            api_key: Some("inline".to_string()),
            api_key_env: "AURA_TEST_UNSET_KEY_VAR".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key().as_deref(), Some("inline"));
    }

    #[test]
    fn test_blank_key_is_none() {
        let config = FileReasoningConfig {
            api_key: Some("  ".to_string()),
            api_key_env: "AURA_TEST_UNSET_KEY_VAR".to_string(),
            ..Default::default()
        };
        assert!(config.resolve_api_key().is_none());
    }
}
