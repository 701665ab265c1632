//! Configuration file loading for aura-chain
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `AURA_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./aura.toml` or `./.aura.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/aura-chain/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    AgentBackend, DEFAULT_GEMINI_ENDPOINT, FileAgentEntry, FileAgentsConfig, FileConfig,
    FileJournalConfig, FileModeConfig, FileOutputConfig, FilePlannerConfig, FileReasoningConfig,
    entry_for,
};
pub use loader::ConfigLoader;
