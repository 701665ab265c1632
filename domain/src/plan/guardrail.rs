//! Guardrail filtering of proposed plans.
//!
//! The planner is asked to respect the mode rules, but its output is never
//! trusted. [`apply_guardrails`] rewrites the declared agent list so that:
//!
//! - agents forbidden in the detected mode are removed
//! - `notifier` survives only when `order_manager` does
//! - duplicate declarations (same normalized name) collapse to the first
//! - `plan.mode` is the detected mode, never the one echoed by the model
//!
//! Steps are left as proposed; the executor re-checks each one against the
//! filtered allow-list.

use super::entities::ExecutionPlan;
use crate::agent::{AgentKind, normalize_agent_name};
use crate::mode::OperatingMode;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Why a declared agent was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "mode", rename_all = "snake_case")]
pub enum RemovalReason {
    /// Banned by the mode's policy table.
    ForbiddenInMode(OperatingMode),
    /// `notifier` declared without `order_manager`.
    NotifierWithoutOrder,
    /// Same agent declared more than once.
    Duplicate,
}

impl fmt::Display for RemovalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemovalReason::ForbiddenInMode(mode) => write!(f, "forbidden in {} mode", mode),
            RemovalReason::NotifierWithoutOrder => {
                write!(f, "notifier requires order_manager")
            }
            RemovalReason::Duplicate => write!(f, "duplicate declaration"),
        }
    }
}

/// One removed agent declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovedAgent {
    /// Name as it appeared in the proposal.
    pub agent: String,
    pub reason: RemovalReason,
}

/// Summary of what the guardrails changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardrailReport {
    pub removed: Vec<RemovedAgent>,
}

impl GuardrailReport {
    pub fn is_clean(&self) -> bool {
        self.removed.is_empty()
    }

    pub fn removed_names(&self) -> Vec<&str> {
        self.removed.iter().map(|r| r.agent.as_str()).collect()
    }
}

/// Filter `plan.agents` for `mode` and stamp the mode onto the plan.
///
/// With `mode = None` (plans produced without mode detection) only the
/// notifier/order_manager rule and de-duplication apply, and `plan.mode`
/// is cleared.
pub fn apply_guardrails(plan: &mut ExecutionPlan, mode: Option<OperatingMode>) -> GuardrailReport {
    let mut report = GuardrailReport::default();
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(plan.agents.len());

    for agent in plan.agents.drain(..) {
        if !seen.insert(normalize_agent_name(&agent)) {
            report.removed.push(RemovedAgent {
                agent,
                reason: RemovalReason::Duplicate,
            });
            continue;
        }

        if let (Some(mode), Some(kind)) = (mode, AgentKind::resolve(&agent))
            && mode.is_forbidden(kind)
        {
            report.removed.push(RemovedAgent {
                agent,
                reason: RemovalReason::ForbiddenInMode(mode),
            });
            continue;
        }

        kept.push(agent);
    }

    let has_order_manager = kept
        .iter()
        .any(|a| AgentKind::resolve(a) == Some(AgentKind::OrderManager));
    if !has_order_manager {
        kept.retain(|agent| {
            if AgentKind::resolve(agent) == Some(AgentKind::Notifier) {
                report.removed.push(RemovedAgent {
                    agent: agent.clone(),
                    reason: RemovalReason::NotifierWithoutOrder,
                });
                false
            } else {
                true
            }
        });
    }

    plan.agents = kept;
    plan.mode = mode;
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::entities::PlanStep;

    fn plan_with(agents: &[&str]) -> ExecutionPlan {
        let mut plan = ExecutionPlan::new("test");
        for agent in agents {
            plan = plan.with_agent(*agent).with_step(PlanStep::new(*agent));
        }
        plan
    }

    const EVERY_AGENT: [&str; 7] = [
        "data_harvester",
        "visualizer",
        "trend_analyst",
        "forecaster",
        "mcts_optimizer",
        "order_manager",
        "notifier",
    ];

    #[test]
    fn test_cold_start_strips_forbidden() {
        let mut plan = plan_with(&EVERY_AGENT);
        let report = apply_guardrails(&mut plan, Some(OperatingMode::ColdStart));

        assert_eq!(plan.agents, vec!["visualizer", "trend_analyst"]);
        assert_eq!(report.removed.len(), 5);
        assert!(
            report
                .removed
                .iter()
                .all(|r| r.reason == RemovalReason::ForbiddenInMode(OperatingMode::ColdStart))
        );
        // Steps are untouched; the executor re-checks them
        assert_eq!(plan.steps.len(), 7);
    }

    #[test]
    fn test_cold_start_strips_forbidden_regardless_of_spelling() {
        let mut plan = plan_with(&["Data Harvester", "MCTSOptimizer", "Forecaster", "visualizer"]);
        apply_guardrails(&mut plan, Some(OperatingMode::ColdStart));
        assert_eq!(plan.agents, vec!["visualizer"]);
    }

    #[test]
    fn test_cold_start_keeps_safe_plan_unchanged() {
        let mut plan = plan_with(&["trend_analyst", "visualizer"]);
        let report = apply_guardrails(&mut plan, Some(OperatingMode::ColdStart));
        assert!(report.is_clean());
        assert_eq!(plan.agents, vec!["trend_analyst", "visualizer"]);
    }

    #[test]
    fn test_deep_dive_keeps_everything() {
        let mut plan = plan_with(&EVERY_AGENT);
        let report = apply_guardrails(&mut plan, Some(OperatingMode::DeepDive));
        assert!(report.is_clean());
        assert_eq!(plan.agents.len(), 7);
    }

    #[test]
    fn test_ad_hoc_removes_notifier() {
        let mut plan = plan_with(&["order_manager", "notifier", "visualizer"]);
        let report = apply_guardrails(&mut plan, Some(OperatingMode::AdHoc));
        assert_eq!(plan.agents, vec!["order_manager", "visualizer"]);
        assert_eq!(report.removed_names(), vec!["notifier"]);
    }

    #[test]
    fn test_notifier_requires_order_manager() {
        let mut plan = plan_with(&["forecaster", "Notifier"]);
        let report = apply_guardrails(&mut plan, Some(OperatingMode::DeepDive));
        assert_eq!(plan.agents, vec!["forecaster"]);
        assert_eq!(report.removed[0].reason, RemovalReason::NotifierWithoutOrder);
    }

    #[test]
    fn test_notifier_with_order_manager_survives() {
        let mut plan = plan_with(&["order_manager", "notifier"]);
        apply_guardrails(&mut plan, Some(OperatingMode::DeepDive));
        assert_eq!(plan.agents, vec!["order_manager", "notifier"]);
    }

    #[test]
    fn test_notifier_implies_order_manager_for_all_modes() {
        let proposals: [&[&str]; 4] = [
            &EVERY_AGENT,
            &["notifier"],
            &["notifier", "order_manager"],
            &["order-manager", "NOTIFIER", "visualizer"],
        ];
        for mode in OperatingMode::ALL.map(Some).into_iter().chain([None]) {
            for agents in proposals {
                let mut plan = plan_with(agents);
                apply_guardrails(&mut plan, mode);
                let kinds: Vec<_> = plan.agents.iter().filter_map(|a| AgentKind::resolve(a)).collect();
                if kinds.contains(&AgentKind::Notifier) {
                    assert!(kinds.contains(&AgentKind::OrderManager), "{mode:?} {agents:?}");
                }
            }
        }
    }

    #[test]
    fn test_mode_is_overwritten() {
        let mut plan = plan_with(&["visualizer"]).with_mode(OperatingMode::DeepDive);
        apply_guardrails(&mut plan, Some(OperatingMode::AdHoc));
        assert_eq!(plan.mode, Some(OperatingMode::AdHoc));

        apply_guardrails(&mut plan, None);
        assert_eq!(plan.mode, None);
    }

    #[test]
    fn test_unmoded_only_applies_cooccurrence() {
        let mut plan = plan_with(&["data_harvester", "forecaster", "notifier"]);
        apply_guardrails(&mut plan, None);
        assert_eq!(plan.agents, vec!["data_harvester", "forecaster"]);
    }

    #[test]
    fn test_duplicates_collapse() {
        let mut plan = plan_with(&["trend_analyst", "Trend Analyst", "visualizer"]);
        let report = apply_guardrails(&mut plan, Some(OperatingMode::AdHoc));
        assert_eq!(plan.agents, vec!["trend_analyst", "visualizer"]);
        assert_eq!(report.removed[0].reason, RemovalReason::Duplicate);
    }

    #[test]
    fn test_unknown_agents_are_kept_for_executor() {
        let mut plan = plan_with(&["sentiment_agent", "visualizer"]);
        let report = apply_guardrails(&mut plan, Some(OperatingMode::ColdStart));
        assert!(report.is_clean());
        assert_eq!(plan.agents, vec!["sentiment_agent", "visualizer"]);
    }

    #[test]
    fn test_removal_reason_display() {
        assert_eq!(
            RemovalReason::ForbiddenInMode(OperatingMode::ColdStart).to_string(),
            "forbidden in cold_start mode"
        );
    }
}
