//! Capability agent adapters.

mod factory;
mod http_agent;
mod reasoning_agent;

pub use factory::ConfiguredAgentFactory;
pub use http_agent::HttpAgent;
pub use reasoning_agent::ReasoningAgent;
