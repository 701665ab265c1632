//! Core domain concepts shared across all subdomains.
//!
//! - [`query::Query`]: a validated, non-blank user query
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod query;
pub mod string;
