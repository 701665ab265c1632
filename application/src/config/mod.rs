//! Application-level configuration.
//!
//! - [`OrchestratorSettings`]: planner model, sampling and mode detection
//! - [`PlanningStrategy`]: guarded (mode-constrained) or open planning

pub mod orchestrator_settings;

pub use orchestrator_settings::{OrchestratorSettings, PlanningStrategy};
