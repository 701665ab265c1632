//! Application layer for aura-chain
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{OrchestratorSettings, PlanningStrategy};
pub use ports::{
    agent_capability::{AgentCapability, AgentFactory, AgentRegistry, CapabilityError, StaticAgentFactory},
    progress::{NoProgress, OrchestrationProgress},
    reasoning_service::{GenerationRequest, ReasoningError, ReasoningService},
    run_journal::{JournalEvent, NoRunJournal, RunJournal},
};
pub use use_cases::execute_plan::ExecutePlanUseCase;
pub use use_cases::generate_plan::{GeneratePlanUseCase, GeneratedPlan, PlanGenerationError};
pub use use_cases::run_query::{QueryOutcome, RunQueryInput, RunQueryUseCase};
