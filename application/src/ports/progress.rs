//! Progress notification port
//!
//! Defines the interface for reporting progress while a query is planned
//! and executed.

use aura_domain::{AgentKind, AgentResult, ExecutionPlan, OperatingMode, SkippedStep};

/// Callback for progress updates during orchestration
///
/// Implementations live in the presentation layer. Every method has a no-op
/// default so implementors only override what they display.
pub trait OrchestrationProgress: Send + Sync {
    /// Called once the mode is known (`None` for open planning)
    fn on_mode_detected(&self, _mode: Option<OperatingMode>) {}

    /// Called before the planner's reasoning call
    fn on_planning_start(&self) {}

    /// Called with the filtered plan
    fn on_plan_ready(&self, _plan: &ExecutionPlan) {}

    /// Called when plan generation fails
    fn on_plan_failed(&self, _error: &str) {}

    /// Called before a step is invoked
    fn on_step_start(&self, _index: usize, _total: usize, _agent: AgentKind) {}

    /// Called when a step is skipped
    fn on_step_skipped(&self, _skipped: &SkippedStep) {}

    /// Called after a step returned (successfully or not)
    fn on_step_complete(&self, _index: usize, _result: &AgentResult) {}

    /// Called once all steps have been walked
    fn on_execution_complete(&self, _succeeded: usize, _failed: usize, _skipped: usize) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl OrchestrationProgress for NoProgress {}
