//! Domain error types

use crate::plan::PlanError;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Query cannot be empty")]
    EmptyQuery,

    #[error(transparent)]
    Plan(#[from] PlanError),
}

impl DomainError {
    /// Whether this error means no plan could be produced.
    pub fn is_plan_failure(&self) -> bool {
        matches!(self, DomainError::Plan(_))
    }
}
