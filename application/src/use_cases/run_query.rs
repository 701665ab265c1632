//! Run Query use case
//!
//! Orchestrates one query end to end: mode detection, plan generation,
//! guardrail filtering, plan execution. Always produces a [`QueryOutcome`];
//! a plan failure ends the query with `success = false` and nothing run.

use crate::config::{OrchestratorSettings, PlanningStrategy};
use crate::ports::agent_capability::AgentFactory;
use crate::ports::progress::{NoProgress, OrchestrationProgress};
use crate::ports::reasoning_service::ReasoningService;
use crate::ports::run_journal::{JournalEvent, NoRunJournal, RunJournal};
use crate::use_cases::execute_plan::ExecutePlanUseCase;
use crate::use_cases::generate_plan::GeneratePlanUseCase;
use aura_domain::{
    AgentKind, AgentResult, ContextMap, ExecutionContext, ExecutionPlan, GuardrailReport, OperatingMode,
    Query, SkippedStep,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Input for the RunQuery use case
#[derive(Debug, Clone)]
pub struct RunQueryInput {
    pub query: Query,
    pub context: ContextMap,
    pub session_id: Option<String>,
    pub user_id: Option<String>,
    /// Stop after planning.
    pub plan_only: bool,
}

impl RunQueryInput {
    pub fn new(query: Query) -> Self {
        Self {
            query,
            context: ContextMap::new(),
            session_id: None,
            user_id: None,
            plan_only: false,
        }
    }

    pub fn with_context(mut self, context: ContextMap) -> Self {
        self.context = context;
        self
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn plan_only(mut self) -> Self {
        self.plan_only = true;
        self
    }
}

/// Everything the caller learns about one query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryOutcome {
    pub request_id: String,
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<OperatingMode>,
    /// Filtered plan; absent when planning failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<ExecutionPlan>,
    #[serde(default)]
    pub guardrails: GuardrailReport,
    /// One entry per executed step, in execution order.
    #[serde(default)]
    pub responses: Vec<AgentResult>,
    #[serde(default)]
    pub skipped: Vec<SkippedStep>,
    /// Whether a plan was produced. Individual agent failures do not
    /// clear it.
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QueryOutcome {
    fn new(request_id: String, session_id: String, mode: Option<OperatingMode>) -> Self {
        Self {
            request_id,
            session_id,
            mode,
            plan: None,
            guardrails: GuardrailReport::default(),
            responses: Vec::new(),
            skipped: Vec::new(),
            success: false,
            error: None,
        }
    }

    pub fn failed_agents(&self) -> usize {
        self.responses.iter().filter(|r| !r.success).count()
    }
}

/// Use case for answering a query with a planned chain of agents
pub struct RunQueryUseCase {
    planner: GeneratePlanUseCase,
    executor: ExecutePlanUseCase,
    settings: OrchestratorSettings,
    journal: Arc<dyn RunJournal>,
}

impl RunQueryUseCase {
    pub fn new(
        reasoning: Arc<dyn ReasoningService>,
        factory: Arc<dyn AgentFactory>,
        settings: OrchestratorSettings,
    ) -> Self {
        Self {
            planner: GeneratePlanUseCase::new(reasoning, settings.clone()),
            executor: ExecutePlanUseCase::new(factory),
            settings,
            journal: Arc::new(NoRunJournal),
        }
    }

    pub fn with_journal(mut self, journal: Arc<dyn RunJournal>) -> Self {
        self.journal = journal;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunQueryInput) -> QueryOutcome {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunQueryInput,
        progress: &dyn OrchestrationProgress,
    ) -> QueryOutcome {
        let request_id = Uuid::new_v4().to_string();
        let session_id = input
            .session_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let query = input.query.text();

        let mode = match self.settings.strategy {
            PlanningStrategy::Guarded => {
                Some(self.settings.mode_detector.detect(query, &input.context))
            }
            PlanningStrategy::Open => None,
        };
        match mode {
            Some(mode) => info!("Detected mode: {}", mode),
            None => info!("Open planning: no mode detection"),
        }
        progress.on_mode_detected(mode);
        self.record(&request_id, "mode_detected", json!({
            "mode": mode,
            "strategy": self.settings.strategy,
            "session_id": session_id,
            "query": query,
        }));

        let mut outcome = QueryOutcome::new(request_id.clone(), session_id.clone(), mode);

        progress.on_planning_start();
        let generated = match self.planner.execute(query, &input.context, mode).await {
            Ok(generated) => generated,
            Err(e) => {
                warn!("Plan generation failed: {}", e);
                progress.on_plan_failed(&e.to_string());
                outcome.error = Some(e.to_string());
                self.record(&request_id, "query_completed", json!({
                    "success": false,
                    "error": e.to_string(),
                    "code": e.code(),
                }));
                return outcome;
            }
        };

        self.record(&request_id, "plan_generated", json!({ "plan": generated.plan }));
        if !generated.guardrails.is_clean() {
            self.record(&request_id, "guardrails_applied", json!({
                "removed": generated.guardrails.removed,
            }));
        }
        progress.on_plan_ready(&generated.plan);

        outcome.success = true;
        outcome.guardrails = generated.guardrails;

        if input.plan_only {
            outcome.plan = Some(generated.plan);
            self.record(&request_id, "query_completed", json!({
                "success": true,
                "plan_only": true,
            }));
            return outcome;
        }

        let mut context = ExecutionContext::new(query, input.context);
        context.session_id = Some(session_id);
        context.user_id = input.user_id;

        let (report, context) = self
            .executor
            .execute_with_progress(&generated.plan, context, progress)
            .await;

        for skipped in &report.skipped {
            self.record(&request_id, "step_skipped", json!(skipped));
        }
        for result in &report.results {
            self.record(&request_id, "agent_result", json!(result));
        }

        info!(
            "Query complete: {} succeeded, {} failed, {} skipped",
            report.succeeded().count(),
            report.failed().count(),
            report.skipped.len()
        );
        let outputs: Vec<&str> = AgentKind::ALL
            .iter()
            .filter(|kind| context.output_of(**kind).is_some())
            .map(|kind| kind.as_str())
            .collect();
        self.record(&request_id, "query_completed", json!({
            "success": true,
            "outputs": outputs,
            "succeeded": report.succeeded().count(),
            "failed": report.failed().count(),
            "skipped": report.skipped.len(),
        }));

        outcome.plan = Some(generated.plan);
        outcome.responses = report.results;
        outcome.skipped = report.skipped;
        outcome
    }

    fn record(&self, request_id: &str, event_type: &'static str, payload: serde_json::Value) {
        self.journal
            .record(JournalEvent::new(event_type, request_id, payload));
    }
}
