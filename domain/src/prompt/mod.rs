//! Prompt domain
//!
//! Templates for the planner's reasoning call.

pub mod planner;

pub use planner::PlannerPromptTemplate;
