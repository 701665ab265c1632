//! Use cases (application services)

pub mod execute_plan;
pub mod generate_plan;
pub mod run_query;
