//! Generate Plan use case
//!
//! One reasoning call turns a query into an [`ExecutionPlan`], which is then
//! run through the guardrail filter. Failures never escape as panics or
//! untyped errors: every path ends in a [`GeneratedPlan`] or a
//! [`PlanGenerationError`].

use crate::config::OrchestratorSettings;
use crate::ports::reasoning_service::{GenerationRequest, ReasoningError, ReasoningService};
use aura_domain::{
    ContextMap, DatasetSummary, ExecutionPlan, GuardrailReport, OperatingMode, PlanError,
    PlannerPromptTemplate, apply_guardrails, has_dataset, parse_plan,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that end a query before anything is executed
#[derive(Error, Debug)]
pub enum PlanGenerationError {
    #[error("reasoning_failed: {0}")]
    Reasoning(#[from] ReasoningError),

    #[error(transparent)]
    Plan(#[from] PlanError),
}

impl PlanGenerationError {
    /// Stable machine-readable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            PlanGenerationError::Reasoning(_) => "reasoning_failed",
            PlanGenerationError::Plan(e) => e.code(),
        }
    }
}

/// A filtered plan plus what the filter removed
#[derive(Debug, Clone)]
pub struct GeneratedPlan {
    pub plan: ExecutionPlan,
    pub guardrails: GuardrailReport,
}

/// Use case for producing a filtered execution plan
pub struct GeneratePlanUseCase {
    reasoning: Arc<dyn ReasoningService>,
    settings: OrchestratorSettings,
}

impl GeneratePlanUseCase {
    pub fn new(reasoning: Arc<dyn ReasoningService>, settings: OrchestratorSettings) -> Self {
        Self {
            reasoning,
            settings,
        }
    }

    /// Plan a query.
    ///
    /// With `Some(mode)` the prompt is constrained to that mode and the
    /// result filtered for it; with `None` the open prompt is used and only
    /// the notifier/order_manager rule is enforced.
    pub async fn execute(
        &self,
        query: &str,
        context: &ContextMap,
        mode: Option<OperatingMode>,
    ) -> Result<GeneratedPlan, PlanGenerationError> {
        let prompt = match mode {
            Some(mode) => PlannerPromptTemplate::guarded(query, mode, has_dataset(context)),
            None => {
                let summary = DatasetSummary::from_context(context);
                PlannerPromptTemplate::open(query, summary.as_ref())
            }
        };

        let request = GenerationRequest::new(&self.settings.planner_model, prompt)
            .with_temperature(self.settings.temperature)
            .with_max_output_tokens(self.settings.max_output_tokens);

        info!(
            "Requesting plan from {} ({})",
            self.reasoning.provider_name(),
            self.settings.planner_model
        );

        let response = self.reasoning.generate(&request).await.map_err(|e| {
            warn!("Planner call failed: {}", e);
            e
        })?;
        debug!("Planner response: {} chars", response.len());

        let mut plan = parse_plan(&response).map_err(|e| {
            warn!("Could not parse plan ({}): {}", e.code(), response);
            e
        })?;

        if let (Some(detected), Some(proposed)) = (mode, plan.mode)
            && detected != proposed
        {
            debug!("Planner proposed mode {}, keeping detected {}", proposed, detected);
        }

        let guardrails = apply_guardrails(&mut plan, mode);
        for removed in &guardrails.removed {
            info!("Guardrail removed {}: {}", removed.agent, removed.reason);
        }

        info!(
            "Plan ready: {} agents, {} steps",
            plan.agents.len(),
            plan.steps.len()
        );

        Ok(GeneratedPlan { plan, guardrails })
    }
}
