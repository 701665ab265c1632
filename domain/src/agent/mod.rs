//! Agent domain module
//!
//! Agent identities and the request/result contract shared by all
//! capability agents.

pub mod kind;
pub mod request;

pub use kind::{AgentKind, normalize_agent_name};
pub use request::{AgentRequest, AgentResult, ContextMap};
