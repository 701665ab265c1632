//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement.

pub mod agent_capability;
pub mod progress;
pub mod reasoning_service;
pub mod run_journal;
