//! Execute Plan use case
//!
//! Walks a filtered plan once, in order. For each step:
//!
//! 1. Resolve the agent name against the registry (unknown → skip)
//! 2. Check the filtered allow-list (not declared → skip)
//! 3. Gate on the declared dependencies that are themselves allowed
//!    (any not yet completed → skip)
//! 4. Invoke with the enriched context and record the result
//!
//! There is no queueing or retry: a step whose dependencies are not
//! satisfied when it is reached never runs. Execution itself never fails;
//! capability errors and panics become failed results.

use crate::ports::agent_capability::{AgentCapability, AgentFactory};
use crate::ports::progress::{NoProgress, OrchestrationProgress};
use aura_domain::{
    AgentKind, AgentRequest, AgentResult, ExecutionContext, ExecutionPlan, ExecutionReport,
    PlanStep, SkipReason, SkippedStep, normalize_agent_name,
};
use chrono::Utc;
use serde_json::{Value, json};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Use case for running a filtered plan against a fresh agent registry
pub struct ExecutePlanUseCase {
    factory: Arc<dyn AgentFactory>,
}

impl ExecutePlanUseCase {
    pub fn new(factory: Arc<dyn AgentFactory>) -> Self {
        Self { factory }
    }

    /// Execute the plan with default (no-op) progress
    pub async fn execute(&self, plan: &ExecutionPlan, context: ExecutionContext) -> ExecutionReport {
        self.execute_with_progress(plan, context, &NoProgress).await.0
    }

    /// Execute the plan with progress callbacks.
    ///
    /// Returns the report and the final context (with every
    /// `{agent}_output` written during the run).
    pub async fn execute_with_progress(
        &self,
        plan: &ExecutionPlan,
        mut context: ExecutionContext,
        progress: &dyn OrchestrationProgress,
    ) -> (ExecutionReport, ExecutionContext) {
        let registry = self.factory.build_registry();
        let allowed = plan.allow_set();
        let total = plan.steps.len();

        let mut completed: HashSet<String> = HashSet::new();
        let mut report = ExecutionReport::default();

        info!("Executing plan: {} steps, {} allowed agents", total, allowed.len());

        for (index, step) in plan.steps.iter().enumerate() {
            let Some((kind, capability)) = registry.resolve(&step.agent) else {
                warn!("Skipping unknown agent: {}", step.agent);
                Self::skip(&mut report, progress, index, step, SkipReason::UnknownAgent);
                continue;
            };

            if !allowed.contains(&kind.normalized()) {
                debug!("Skipping {}: not in plan agents", kind);
                Self::skip(&mut report, progress, index, step, SkipReason::Disallowed);
                continue;
            }

            let relevant_deps: Vec<&String> = step
                .depends_on
                .iter()
                .filter(|dep| allowed.contains(&normalize_agent_name(dep)))
                .collect();
            let missing: Vec<String> = relevant_deps
                .iter()
                .filter(|dep| !completed.contains(&normalize_agent_name(dep)))
                .map(|dep| dep.to_string())
                .collect();

            if !missing.is_empty() {
                warn!("Skipping {} due to missing dependencies: {:?}", kind, missing);
                Self::skip(
                    &mut report,
                    progress,
                    index,
                    step,
                    SkipReason::UnsatisfiedDependency { missing },
                );
                continue;
            }

            let request = AgentRequest::new(step.task.clone().unwrap_or_else(|| context.query.clone()))
                .with_context(context.step_context())
                .with_parameters(step.parameters.clone())
                .with_session(context.session_id.clone(), context.user_id.clone());

            progress.on_step_start(index, total, kind);
            let started = Instant::now();
            let result = Self::invoke(kind, Arc::clone(capability), request).await;
            let result = Self::finalize(kind, result, started);

            if result.success {
                completed.insert(kind.normalized());
                if let Some(data) = result.data.as_ref().filter(|d| !d.is_null()) {
                    context.record_output(kind, data.clone());
                }
                info!("Agent {} completed", kind);
            } else {
                warn!(
                    "Agent {} failed: {}",
                    kind,
                    result.error.as_deref().unwrap_or_default()
                );
            }

            progress.on_step_complete(index, &result);
            report.results.push(result);
        }

        progress.on_execution_complete(
            report.succeeded().count(),
            report.failed().count(),
            report.skipped.len(),
        );

        (report, context)
    }

    fn skip(
        report: &mut ExecutionReport,
        progress: &dyn OrchestrationProgress,
        index: usize,
        step: &PlanStep,
        reason: SkipReason,
    ) {
        let skipped = SkippedStep {
            index,
            agent: step.agent.clone(),
            reason,
        };
        progress.on_step_skipped(&skipped);
        report.skipped.push(skipped);
    }

    /// Run one capability call on its own task so a panic surfaces as a
    /// join error instead of unwinding through the executor.
    async fn invoke(
        kind: AgentKind,
        capability: Arc<dyn AgentCapability>,
        request: AgentRequest,
    ) -> AgentResult {
        let handle = tokio::spawn(async move { capability.process(&request).await });

        match handle.await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => AgentResult::failure(kind.as_str(), e.to_string()),
            Err(join_error) if join_error.is_panic() => {
                AgentResult::failure(kind.as_str(), format!("Agent {} panicked", kind))
            }
            Err(join_error) => AgentResult::failure(kind.as_str(), join_error.to_string()),
        }
    }

    /// Force the canonical name, stamp timing, and restore the
    /// data-iff-success shape.
    fn finalize(kind: AgentKind, mut result: AgentResult, started: Instant) -> AgentResult {
        result.agent_name = kind.as_str().to_string();
        result.timestamp = Some(Utc::now().to_rfc3339());
        result.metadata.insert(
            "execution_ms".to_string(),
            json!(started.elapsed().as_millis() as u64),
        );

        if result.success {
            result.error = None;
            if result.data.is_none() {
                result.data = Some(Value::Object(Default::default()));
            }
        } else {
            result.data = None;
            if result.error.is_none() {
                result.error = Some("Agent reported failure without an error".to_string());
            }
        }
        result
    }
}
