//! Gemini `generateContent` client implementing [`ReasoningService`].

use super::error::GeminiError;
use crate::config::FileReasoningConfig;
use async_trait::async_trait;
use aura_application::{GenerationRequest, ReasoningError, ReasoningService};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini client configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    pub api_key: Option<String>,
    /// Environment variable the key was expected in (for error messages).
    pub api_key_env: String,
    /// Base endpoint URL.
    pub endpoint: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: "GOOGLE_API_KEY".to_string(),
            endpoint: crate::config::DEFAULT_GEMINI_ENDPOINT.to_string(),
            timeout_secs: 60,
        }
    }
}

impl GeminiConfig {
    /// Build from the `[reasoning]` section, resolving the API key.
    pub fn from_file(config: &FileReasoningConfig) -> Self {
        Self {
            api_key: config.resolve_api_key(),
            api_key_env: config.api_key_env.clone(),
            endpoint: config.base_url.clone(),
            timeout_secs: config.timeout_seconds,
        }
    }
}

/// Reasoning service backed by the Gemini REST API.
pub struct GeminiReasoningService {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiReasoningService {
    pub fn new(config: GeminiConfig) -> Result<Self, GeminiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    fn build_url(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            model
        )
    }

    async fn call(&self, request: &GenerationRequest) -> Result<String, GeminiError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| GeminiError::MissingApiKey(self.config.api_key_env.clone()))?;

        let body = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: request.prompt.clone(),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_output_tokens,
            },
        };

        debug!(
            "Gemini generateContent: model={}, prompt={} chars",
            request.model,
            request.prompt.len()
        );

        let response = self
            .client
            .post(self.build_url(&request.model))
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<GeminiResponse>(&text)
                .ok()
                .and_then(|r| r.error)
                .map(|e| e.message)
                .unwrap_or(text);
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GeminiResponse = serde_json::from_str(&text)?;
        extract_text(parsed)
    }
}

/// Concatenate every text part of the first candidate.
///
/// A candidate blocked by safety filters has no text parts; that yields an
/// empty string rather than an error.
fn extract_text(response: GeminiResponse) -> Result<String, GeminiError> {
    if let Some(error) = response.error {
        return Err(GeminiError::Api {
            status: error.code.unwrap_or(0),
            message: error.message,
        });
    }

    let candidate = response
        .candidates
        .and_then(|c| c.into_iter().next())
        .ok_or(GeminiError::NoCandidates)?;

    if let Some(reason) = &candidate.finish_reason
        && reason != "STOP"
    {
        warn!("Gemini candidate finished with {}", reason);
    }

    Ok(candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect::<String>())
        .unwrap_or_default())
}

#[async_trait]
impl ReasoningService for GeminiReasoningService {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ReasoningError> {
        self.call(request).await.map_err(ReasoningError::from)
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }
}

// Gemini API request/response structures

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    error: Option<GeminiErrorDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContentResponse>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiContentResponse {
    #[serde(default)]
    parts: Vec<GeminiPartResponse>,
}

#[derive(Debug, Deserialize)]
struct GeminiPartResponse {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
    code: Option<u16>,
}
