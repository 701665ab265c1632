//! Agent identity value object.
//!
//! Plans produced by the reasoning service name agents in whatever style the
//! model prefers (`"Data Harvester"`, `"data_harvester"`, `"DataHarvester"`).
//! [`AgentKind`] is the closed set of capabilities the orchestrator knows
//! about, and [`normalize_agent_name`] is the single rule used to map any of
//! those spellings onto it.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Characters ignored when comparing agent names.
const NAME_SEPARATORS: [char; 3] = ['_', ' ', '-'];

/// Canonicalize a free-form agent name for comparison.
///
/// Lower-cases the name and strips `_`, space and `-`, so
/// `"Data Harvester"`, `"data_harvester"` and `"DataHarvester"` all become
/// `"dataharvester"`. Idempotent.
pub fn normalize_agent_name(name: &str) -> String {
    name.chars()
        .filter(|c| !NAME_SEPARATORS.contains(c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Known capability agents (Value Object).
///
/// The snake_case form returned by [`AgentKind::as_str`] is the canonical
/// identity attached to results and used for `{name}_output` context keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgentKind {
    DataHarvester,
    Visualizer,
    TrendAnalyst,
    Forecaster,
    MctsOptimizer,
    OrderManager,
    Notifier,
}

impl AgentKind {
    /// Every known agent, in the order they are presented to the planner.
    pub const ALL: [AgentKind; 7] = [
        AgentKind::DataHarvester,
        AgentKind::Visualizer,
        AgentKind::TrendAnalyst,
        AgentKind::Forecaster,
        AgentKind::MctsOptimizer,
        AgentKind::OrderManager,
        AgentKind::Notifier,
    ];

    /// Canonical registry key.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentKind::DataHarvester => "data_harvester",
            AgentKind::Visualizer => "visualizer",
            AgentKind::TrendAnalyst => "trend_analyst",
            AgentKind::Forecaster => "forecaster",
            AgentKind::MctsOptimizer => "mcts_optimizer",
            AgentKind::OrderManager => "order_manager",
            AgentKind::Notifier => "notifier",
        }
    }

    /// One-line capability description shown to the planner.
    pub fn capability(&self) -> &'static str {
        match self {
            AgentKind::DataHarvester => {
                "Ingests, cleans, and preprocesses data. Runs for new uploads OR when Deep Dive/Optimization requires guaranteed data quality."
            }
            AgentKind::Visualizer => "Creates charts and graphs.",
            AgentKind::TrendAnalyst => {
                "Identifies trends. Uses internal data (Deep Dive) or external market signals (Cold Start)."
            }
            AgentKind::Forecaster => "Predicts future values.",
            AgentKind::MctsOptimizer => "Optimizes inventory/decisions. Requires internal data.",
            AgentKind::OrderManager => {
                "Drafts orders. Used ONLY when user explicitly wants to buy/order."
            }
            AgentKind::Notifier => "Sends alerts. Used ONLY after an order is created.",
        }
    }

    /// Whether the agent needs historical data to do anything useful.
    pub fn requires_dataset(&self) -> bool {
        matches!(
            self,
            AgentKind::DataHarvester | AgentKind::Forecaster | AgentKind::MctsOptimizer
        )
    }

    /// Resolve a free-form name to a known agent, ignoring case and separators.
    pub fn resolve(name: &str) -> Option<AgentKind> {
        let normalized = normalize_agent_name(name);
        Self::ALL
            .into_iter()
            .find(|kind| normalize_agent_name(kind.as_str()) == normalized)
    }

    /// Key under which a successful run's data is stored in the shared context.
    pub fn output_key(&self) -> String {
        format!("{}_output", self.as_str())
    }

    /// Normalized form, as used for allow-set and completion bookkeeping.
    pub fn normalized(&self) -> String {
        normalize_agent_name(self.as_str())
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AgentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgentKind::resolve(s).ok_or_else(|| format!("Unknown agent: {}", s))
    }
}

impl Serialize for AgentKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AgentKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_equivalent_spellings() {
        let a = normalize_agent_name("Data_Harvester");
        let b = normalize_agent_name("data harvester");
        let c = normalize_agent_name("DATAHARVESTER");
        assert_eq!(a, "dataharvester");
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for name in ["MCTS-Optimizer", "order manager", "Trend_Analyst", "notifier"] {
            let once = normalize_agent_name(name);
            assert_eq!(normalize_agent_name(&once), once);
        }
    }

    #[test]
    fn test_resolve_alias_table() {
        let aliases = [
            ("data_harvester", AgentKind::DataHarvester),
            ("Data Harvester", AgentKind::DataHarvester),
            ("DataHarvester", AgentKind::DataHarvester),
            ("data-harvester", AgentKind::DataHarvester),
            ("visualizer", AgentKind::Visualizer),
            ("Visualizer", AgentKind::Visualizer),
            ("trend_analyst", AgentKind::TrendAnalyst),
            ("TrendAnalyst", AgentKind::TrendAnalyst),
            ("Trend Analyst", AgentKind::TrendAnalyst),
            ("forecaster", AgentKind::Forecaster),
            ("FORECASTER", AgentKind::Forecaster),
            ("mcts_optimizer", AgentKind::MctsOptimizer),
            ("MCTS Optimizer", AgentKind::MctsOptimizer),
            ("MctsOptimizer", AgentKind::MctsOptimizer),
            ("order_manager", AgentKind::OrderManager),
            ("Order-Manager", AgentKind::OrderManager),
            ("notifier", AgentKind::Notifier),
            (" Notifier ", AgentKind::Notifier),
        ];

        for (alias, expected) in aliases {
            assert_eq!(AgentKind::resolve(alias), Some(expected), "alias {alias:?}");
        }
    }

    #[test]
    fn test_resolve_unknown() {
        assert_eq!(AgentKind::resolve("optimizer"), None);
        assert_eq!(AgentKind::resolve("data_harvest"), None);
        assert_eq!(AgentKind::resolve(""), None);
    }

    #[test]
    fn test_canonical_round_trip() {
        for kind in AgentKind::ALL {
            assert_eq!(kind.as_str().parse::<AgentKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_output_key() {
        assert_eq!(AgentKind::TrendAnalyst.output_key(), "trend_analyst_output");
    }

    #[test]
    fn test_serde_uses_canonical_name() {
        let json = serde_json::to_string(&AgentKind::MctsOptimizer).unwrap();
        assert_eq!(json, "\"mcts_optimizer\"");
        let kind: AgentKind = serde_json::from_str("\"MCTS Optimizer\"").unwrap();
        assert_eq!(kind, AgentKind::MctsOptimizer);
    }
}
