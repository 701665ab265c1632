//! Capability agent forwarded to an HTTP endpoint.
//!
//! The endpoint receives the [`AgentRequest`] as JSON and answers with
//! `{"success": bool, "data": .., "error": ".."}`.

use async_trait::async_trait;
use aura_application::{AgentCapability, CapabilityError};
use aura_domain::{AgentKind, AgentRequest, AgentResult};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Max response body size (5 MB)
const MAX_BODY_SIZE: usize = 5 * 1024 * 1024;

#[derive(Debug, Deserialize)]
struct HttpAgentResponse {
    success: bool,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

pub struct HttpAgent {
    kind: AgentKind,
    endpoint: String,
    client: reqwest::Client,
}

impl HttpAgent {
    pub fn new(kind: AgentKind, endpoint: impl Into<String>, timeout_secs: u64) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            kind,
            endpoint: endpoint.into(),
            client,
        })
    }
}

fn into_result(kind: AgentKind, response: HttpAgentResponse) -> AgentResult {
    if response.success {
        AgentResult::success(kind.as_str(), response.data.unwrap_or(Value::Null))
    } else {
        AgentResult::failure(
            kind.as_str(),
            response
                .error
                .unwrap_or_else(|| "agent reported failure".to_string()),
        )
    }
}

#[async_trait]
impl AgentCapability for HttpAgent {
    fn kind(&self) -> AgentKind {
        self.kind
    }

    async fn process(&self, request: &AgentRequest) -> Result<AgentResult, CapabilityError> {
        debug!("POST {} for {}", self.endpoint, self.kind);

        let response = self
            .client
            .post(&self.endpoint)
            .header("User-Agent", "aura-chain/0.4 (Agent)")
            .json(request)
            .send()
            .await
            .map_err(|e| CapabilityError::Transport(format!("Failed to reach {}: {}", self.endpoint, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CapabilityError::Transport(format!(
                "HTTP error: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CapabilityError::Transport(format!("Failed to read response body: {}", e)))?;
        if body.len() > MAX_BODY_SIZE {
            return Err(CapabilityError::InvalidResponse(format!(
                "Response too large: {} bytes",
                body.len()
            )));
        }

        let parsed: HttpAgentResponse = serde_json::from_slice(&body)
            .map_err(|e| CapabilityError::InvalidResponse(e.to_string()))?;
        Ok(into_result(self.kind, parsed))
    }
}
