//! Operating mode definitions.
//!
//! The [`OperatingMode`] classifies what class of work a query is allowed to
//! trigger. Each mode carries a static deny-list of agents and a
//! planner-facing description of what is expected in that mode.

use crate::agent::AgentKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating regime detected for a query.
///
/// | Mode | Forbidden agents |
/// |------|------------------|
/// | `cold_start` | data_harvester, mcts_optimizer, order_manager, notifier, forecaster |
/// | `deep_dive` | none |
/// | `ad_hoc` | notifier |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatingMode {
    /// No dataset attached: only external-signal and presentation agents.
    ColdStart,
    /// Dataset attached and the user asked for analysis, optimization or an order.
    DeepDive,
    /// Dataset attached and a specific, simple question.
    AdHoc,
}

const COLD_START_FORBIDDEN: &[AgentKind] = &[
    AgentKind::DataHarvester,
    AgentKind::MctsOptimizer,
    AgentKind::OrderManager,
    AgentKind::Notifier,
    AgentKind::Forecaster,
];

const AD_HOC_FORBIDDEN: &[AgentKind] = &[AgentKind::Notifier];

impl OperatingMode {
    pub const ALL: [OperatingMode; 3] = [
        OperatingMode::ColdStart,
        OperatingMode::DeepDive,
        OperatingMode::AdHoc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OperatingMode::ColdStart => "cold_start",
            OperatingMode::DeepDive => "deep_dive",
            OperatingMode::AdHoc => "ad_hoc",
        }
    }

    /// Agents that must never run in this mode.
    pub fn forbidden_agents(&self) -> &'static [AgentKind] {
        match self {
            OperatingMode::ColdStart => COLD_START_FORBIDDEN,
            OperatingMode::DeepDive => &[],
            OperatingMode::AdHoc => AD_HOC_FORBIDDEN,
        }
    }

    pub fn is_forbidden(&self, agent: AgentKind) -> bool {
        self.forbidden_agents().contains(&agent)
    }

    /// Agents the planner may propose in this mode.
    pub fn allowed_agents(&self) -> Vec<AgentKind> {
        AgentKind::ALL
            .into_iter()
            .filter(|agent| !self.is_forbidden(*agent))
            .collect()
    }

    /// Planner-facing rules for this mode.
    pub fn guidance(&self) -> &'static str {
        match self {
            OperatingMode::ColdStart => {
                r#"**COLD START** (no dataset attached)
- The user asks generic market questions (e.g. "Sneaker trends").
- ALLOWED: trend_analyst (external signals), visualizer.
- BANNED: data_harvester, mcts_optimizer, forecaster (requires history), order_manager, notifier."#
            }
            OperatingMode::DeepDive => {
                r#"**DEEP DIVE** (dataset attached + analysis/optimization request)
- The user wants full optimization, forecasting, or deep analysis on their data.
- PIPELINE: data_harvester -> trend_analyst -> forecaster -> mcts_optimizer.
- You MUST run `data_harvester` first to guarantee clean data, even if the file is already uploaded.
- Optional: order_manager (only if asked), notifier (only if an order is created)."#
            }
            OperatingMode::AdHoc => {
                r#"**AD-HOC QUERY** (dataset attached + specific simple question)
- The user asks a specific question (e.g. "Show sales for March").
- Call ONLY the relevant agent (e.g. visualizer OR trend_analyst).
- Skip `data_harvester`; assume the data is clean enough.
- BANNED: full pipeline, notifier."#
            }
        }
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OperatingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "cold_start" | "coldstart" => Ok(OperatingMode::ColdStart),
            "deep_dive" | "deepdive" => Ok(OperatingMode::DeepDive),
            "ad_hoc" | "adhoc" => Ok(OperatingMode::AdHoc),
            _ => Err(format!("Invalid OperatingMode: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_table() {
        assert_eq!(
            OperatingMode::ColdStart.forbidden_agents(),
            &[
                AgentKind::DataHarvester,
                AgentKind::MctsOptimizer,
                AgentKind::OrderManager,
                AgentKind::Notifier,
                AgentKind::Forecaster,
            ]
        );
        assert!(OperatingMode::DeepDive.forbidden_agents().is_empty());
        assert_eq!(OperatingMode::AdHoc.forbidden_agents(), &[AgentKind::Notifier]);
    }

    #[test]
    fn test_allowed_agents_cold_start() {
        assert_eq!(
            OperatingMode::ColdStart.allowed_agents(),
            vec![AgentKind::Visualizer, AgentKind::TrendAnalyst]
        );
        assert_eq!(OperatingMode::DeepDive.allowed_agents().len(), AgentKind::ALL.len());
    }

    #[test]
    fn test_display_and_parse() {
        for mode in OperatingMode::ALL {
            assert_eq!(mode.to_string().parse::<OperatingMode>().unwrap(), mode);
        }
        assert_eq!("Deep Dive".parse::<OperatingMode>().unwrap(), OperatingMode::DeepDive);
        assert_eq!("ADHOC".parse::<OperatingMode>().unwrap(), OperatingMode::AdHoc);
        assert!("turbo".parse::<OperatingMode>().is_err());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&OperatingMode::ColdStart).unwrap();
        assert_eq!(json, "\"cold_start\"");
        let mode: OperatingMode = serde_json::from_str("\"ad_hoc\"").unwrap();
        assert_eq!(mode, OperatingMode::AdHoc);
    }
}
