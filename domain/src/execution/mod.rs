//! Plan execution domain
//!
//! The mutable context threaded between steps and the report the executor
//! returns.

pub mod context;
pub mod report;

pub use context::ExecutionContext;
pub use report::{ExecutionReport, SkipReason, SkippedStep};
