//! Error types for the Gemini adapter

use aura_application::ReasoningError;
use thiserror::Error;

/// Errors that can occur when calling the Gemini API
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Gemini API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("No candidates in response")]
    NoCandidates,

    #[error("Missing API key (set {0})")]
    MissingApiKey(String),
}

/// Request URLs are dropped from transport errors so nothing bound to the
/// request leaks into messages, logs or the journal.
impl From<reqwest::Error> for GeminiError {
    fn from(error: reqwest::Error) -> Self {
        GeminiError::Http(error.without_url())
    }
}

impl From<GeminiError> for ReasoningError {
    fn from(error: GeminiError) -> Self {
        match error {
            GeminiError::Http(e) if e.is_timeout() => ReasoningError::Timeout,
            GeminiError::Http(e) if e.is_connect() => ReasoningError::ConnectionError(e.to_string()),
            GeminiError::Http(e) => ReasoningError::RequestFailed(e.to_string()),
            GeminiError::Serialization(e) => ReasoningError::InvalidResponse(e.to_string()),
            GeminiError::Api { status: 404, message } => ReasoningError::ModelNotAvailable(message),
            e @ GeminiError::Api { .. } => ReasoningError::RequestFailed(e.to_string()),
            GeminiError::NoCandidates => {
                ReasoningError::InvalidResponse("no candidates in response".to_string())
            }
            GeminiError::MissingApiKey(var) => ReasoningError::MissingApiKey(var),
        }
    }
}
