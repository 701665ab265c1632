//! Execution plan domain
//!
//! Plan entities, parsing of planner output, and the guardrail filter.

pub mod entities;
pub mod guardrail;
pub mod parser;

pub use entities::{ExecutionPlan, PlanStep};
pub use guardrail::{GuardrailReport, RemovalReason, RemovedAgent, apply_guardrails};
pub use parser::{PlanError, parse_plan, parse_plan_json, strip_code_fence};
