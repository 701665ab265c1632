//! Orchestrator settings: planner call and mode detection parameters.
//!
//! [`OrchestratorSettings`] groups the static parameters the
//! [`RunQueryUseCase`](crate::use_cases::run_query::RunQueryUseCase) needs:
//! which model plans, how it is sampled, and how queries are classified.

use aura_domain::ModeDetector;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the planner is prompted and how its output is filtered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanningStrategy {
    /// Detect a mode, constrain the prompt to it, filter the result.
    #[default]
    Guarded,
    /// No mode; prompt with the capability table and a dataset summary.
    Open,
}

impl PlanningStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanningStrategy::Guarded => "guarded",
            PlanningStrategy::Open => "open",
        }
    }
}

impl fmt::Display for PlanningStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanningStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "guarded" => Ok(PlanningStrategy::Guarded),
            "open" => Ok(PlanningStrategy::Open),
            _ => Err(format!("Invalid planning strategy: {} (expected guarded or open)", s)),
        }
    }
}

/// Planner and mode detection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorSettings {
    /// Model used for the planning call.
    pub planner_model: String,
    /// Low temperature keeps plans close to the JSON schema.
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub strategy: PlanningStrategy,
    pub mode_detector: ModeDetector,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            planner_model: "gemini-2.0-flash".to_string(),
            temperature: 0.1,
            max_output_tokens: 2000,
            strategy: PlanningStrategy::Guarded,
            mode_detector: ModeDetector::default(),
        }
    }
}

impl OrchestratorSettings {
    // ==================== Builder Methods ====================

    pub fn with_planner_model(mut self, model: impl Into<String>) -> Self {
        self.planner_model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = max;
        self
    }

    pub fn with_strategy(mut self, strategy: PlanningStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_mode_detector(mut self, detector: ModeDetector) -> Self {
        self.mode_detector = detector;
        self
    }
}
