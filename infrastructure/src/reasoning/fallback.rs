//! Degrade-to-text decorator for [`ReasoningService`].

use async_trait::async_trait;
use aura_application::{GenerationRequest, ReasoningError, ReasoningService};
use std::sync::Arc;
use tracing::warn;

/// Text returned in place of a failed reasoning call.
pub const FALLBACK_TEXT: &str = "Analysis temporarily unavailable due to API constraints.";

/// Wraps a reasoning service so transport failures never surface as errors.
///
/// The planner then sees non-JSON text and reports `invalid_plan`, which
/// keeps plan parsing the single error surface for planning.
pub struct FallbackReasoningService {
    inner: Arc<dyn ReasoningService>,
}

impl FallbackReasoningService {
    pub fn new(inner: Arc<dyn ReasoningService>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ReasoningService for FallbackReasoningService {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ReasoningError> {
        match self.inner.generate(request).await {
            Ok(text) => Ok(text),
            Err(e) => {
                warn!(
                    "{} call failed for model {}: {}",
                    self.inner.provider_name(),
                    request.model,
                    e
                );
                Ok(FALLBACK_TEXT.to_string())
            }
        }
    }

    fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}
