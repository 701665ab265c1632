//! Infrastructure layer for aura-chain
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the Gemini reasoning service, capability
//! agent backends, the run journal, dataset loading, and configuration
//! file loading.

pub mod agents;
pub mod config;
pub mod dataset;
pub mod gemini;
pub mod logging;
pub mod reasoning;

// Re-export commonly used types
pub use agents::{ConfiguredAgentFactory, HttpAgent, ReasoningAgent};
pub use config::{
    AgentBackend, ConfigLoader, FileAgentEntry, FileAgentsConfig, FileConfig, FileJournalConfig,
    FileModeConfig, FileOutputConfig, FilePlannerConfig, FileReasoningConfig,
};
pub use dataset::{DatasetError, LoadedDataset, LocalDatasetLoader};
pub use gemini::{GeminiConfig, GeminiError, GeminiReasoningService};
pub use logging::JsonlRunJournal;
pub use reasoning::{FALLBACK_TEXT, FallbackReasoningService};
